//! Front-end state: which menu is open, which member is focused, and the
//! translation of key presses into engine commands.

use crossterm::event::KeyCode;
use stagequest::character::UpgradeStat;
use stagequest::core::error::ActionError;
use stagequest::core::snapshot::GameSnapshot;
use stagequest::core::turn::{ActionReport, Phase};
use stagequest::items::{EquipmentSlot, ItemId, SHOP_STOCK};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Inventory,
    Shop,
    Upgrade,
    Unequip,
    Help,
}

impl Overlay {
    pub fn title(&self) -> &'static str {
        match self {
            Overlay::Inventory => " Inventory ",
            Overlay::Shop => " Shop ",
            Overlay::Upgrade => " Upgrade Stats ",
            Overlay::Unequip => " Unequip ",
            Overlay::Help => " Help ",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Menu {
    pub overlay: Overlay,
    pub cursor: usize,
}

/// Something the player asked the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Attack,
    Special,
    Defend,
    NextStage,
    UseItem(ItemId),
    Buy(ItemId),
    Upgrade { member: usize, stat: UpgradeStat },
    Unequip { member: usize, slot: EquipmentSlot },
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub command: Option<Command>,
}

#[derive(Debug, Default)]
pub struct App {
    pub menu: Option<Menu>,
    /// Member that upgrade and unequip menus act on.
    pub focus_member: usize,
    pub status: Option<String>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a key press to a command, updating menu state on the way.
    pub fn handle_key(&mut self, key: KeyCode, snapshot: &GameSnapshot) -> Option<Command> {
        if let Some(menu) = self.menu {
            return self.handle_menu_key(menu, key, snapshot);
        }
        // Battle commands are only offered while a battle is running.
        let in_battle = snapshot.phase == Phase::Battle;
        match key {
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char('a') if in_battle => Some(Command::Attack),
            KeyCode::Char('s') if in_battle => Some(Command::Special),
            KeyCode::Char('d') if in_battle => Some(Command::Defend),
            KeyCode::Char('n') | KeyCode::Enter if snapshot.phase == Phase::StageCleared => {
                Some(Command::NextStage)
            }
            KeyCode::Tab => {
                let len = snapshot.members.len().max(1);
                self.focus_member = (self.focus_member + 1) % len;
                None
            }
            KeyCode::Char('i') => self.open(Overlay::Inventory),
            KeyCode::Char('b') => self.open(Overlay::Shop),
            KeyCode::Char('u') => self.open(Overlay::Upgrade),
            KeyCode::Char('e') => self.open(Overlay::Unequip),
            KeyCode::Char('h') | KeyCode::Char('?') => self.open(Overlay::Help),
            _ => None,
        }
    }

    fn open(&mut self, overlay: Overlay) -> Option<Command> {
        self.menu = Some(Menu { overlay, cursor: 0 });
        None
    }

    fn handle_menu_key(
        &mut self,
        menu: Menu,
        key: KeyCode,
        snapshot: &GameSnapshot,
    ) -> Option<Command> {
        let entries = self.menu_entries(menu.overlay, snapshot);
        match key {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.menu = None;
                None
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.set_cursor(menu, menu.cursor.saturating_sub(1));
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let last = entries.len().saturating_sub(1);
                self.set_cursor(menu, (menu.cursor + 1).min(last));
                None
            }
            KeyCode::Tab => {
                let len = snapshot.members.len().max(1);
                self.focus_member = (self.focus_member + 1) % len;
                self.set_cursor(menu, 0);
                None
            }
            KeyCode::Enter => {
                let command = entries.get(menu.cursor).and_then(|e| e.command);
                if menu.overlay == Overlay::Help {
                    self.menu = None;
                }
                command
            }
            _ => None,
        }
    }

    fn set_cursor(&mut self, menu: Menu, cursor: usize) {
        self.menu = Some(Menu { cursor, ..menu });
    }

    /// Rows of the given menu, built from the latest snapshot.
    pub fn menu_entries(&self, overlay: Overlay, snapshot: &GameSnapshot) -> Vec<MenuEntry> {
        let member = self.focus_member.min(snapshot.members.len().saturating_sub(1));
        match overlay {
            Overlay::Inventory => snapshot
                .party
                .inventory
                .iter()
                .map(|row| MenuEntry {
                    label: format!(
                        "{} x{}  ({})",
                        row.name,
                        row.quantity,
                        row.item.item().description
                    ),
                    command: Some(Command::UseItem(row.item)),
                })
                .collect(),
            Overlay::Shop => SHOP_STOCK
                .iter()
                .map(|item| {
                    let def = item.item();
                    MenuEntry {
                        label: format!("{:<16} {:>4}g  {}", def.name, def.price, def.description),
                        command: Some(Command::Buy(*item)),
                    }
                })
                .collect(),
            Overlay::Upgrade => UpgradeStat::ALL
                .iter()
                .map(|stat| MenuEntry {
                    label: format!("{} (+{})", stat, stat.increment()),
                    command: Some(Command::Upgrade {
                        member,
                        stat: *stat,
                    }),
                })
                .collect(),
            Overlay::Unequip => {
                let Some(m) = snapshot.members.get(member) else {
                    return Vec::new();
                };
                let eq = &m.equipment;
                EquipmentSlot::ALL
                    .iter()
                    .map(|slot| {
                        let item = match slot {
                            EquipmentSlot::Weapon => &eq.weapon,
                            EquipmentSlot::Armor => &eq.armor,
                            EquipmentSlot::Accessory => &eq.accessory,
                        };
                        MenuEntry {
                            label: format!(
                                "{:<10} {}",
                                slot.name(),
                                item.as_deref().unwrap_or("-")
                            ),
                            command: item.as_ref().map(|_| Command::Unequip {
                                member,
                                slot: *slot,
                            }),
                        }
                    })
                    .collect()
            }
            Overlay::Help => HELP_LINES
                .iter()
                .map(|line| MenuEntry {
                    label: line.to_string(),
                    command: None,
                })
                .collect(),
        }
    }

    /// Updates the status line from a command result.
    pub fn record(&mut self, result: &Result<ActionReport, ActionError>) {
        self.status = match result {
            Err(error) => Some(error.to_string()),
            Ok(report) if report.is_defeat() => {
                Some("Your party was wiped out. Starting over from stage 1.".to_string())
            }
            Ok(report) => report
                .victory()
                .map(|v| format!("Stage {} cleared! Press n for stage {}.", v.stage_cleared, v.next_stage)),
        };
    }
}

const HELP_LINES: [&str; 11] = [
    "a        attack",
    "s        special attack",
    "d        defend",
    "n        next stage (after a victory)",
    "i        inventory: use or equip an item",
    "b        shop",
    "u        spend upgrade points",
    "e        unequip",
    "Tab      focus next party member",
    "Up/Down  move, Enter to confirm, Esc to close",
    "q        quit",
];

#[cfg(test)]
mod tests {
    use super::*;
    use stagequest::core::config::GameConfig;
    use stagequest::core::game::Game;

    fn snapshot() -> GameSnapshot {
        Game::new(GameConfig::party().with_seed(1)).snapshot()
    }

    #[test]
    fn test_battle_keys() {
        let mut app = App::new();
        let snap = snapshot();
        assert_eq!(app.handle_key(KeyCode::Char('a'), &snap), Some(Command::Attack));
        assert_eq!(app.handle_key(KeyCode::Char('d'), &snap), Some(Command::Defend));
        // Only offered between stages
        assert_eq!(app.handle_key(KeyCode::Char('n'), &snap), None);
    }

    #[test]
    fn test_shop_menu_buys_selected_item() {
        let mut app = App::new();
        let snap = snapshot();
        assert_eq!(app.handle_key(KeyCode::Char('b'), &snap), None);
        app.handle_key(KeyCode::Down, &snap);
        assert_eq!(
            app.handle_key(KeyCode::Enter, &snap),
            Some(Command::Buy(ItemId::ManaPotion))
        );
        app.handle_key(KeyCode::Esc, &snap);
        assert!(app.menu.is_none());
    }

    #[test]
    fn test_tab_cycles_focus() {
        let mut app = App::new();
        let snap = snapshot();
        app.handle_key(KeyCode::Tab, &snap);
        assert_eq!(app.focus_member, 1);
        app.handle_key(KeyCode::Tab, &snap);
        assert_eq!(app.focus_member, 0);
    }

    #[test]
    fn test_inventory_menu_uses_stocked_items() {
        let mut game = Game::new(GameConfig::party().with_seed(1));
        game.party_mut().inventory.add(ItemId::HealthPotion, 2);
        game.party_mut().inventory.add(ItemId::IronSword, 1);

        let entries = App::new().menu_entries(Overlay::Inventory, &game.snapshot());

        let commands: Vec<Option<Command>> = entries.iter().map(|e| e.command).collect();
        assert_eq!(
            commands,
            vec![
                Some(Command::UseItem(ItemId::HealthPotion)),
                Some(Command::UseItem(ItemId::IronSword)),
            ]
        );
        assert!(entries[0].label.starts_with("Health Potion x2"));
    }

    #[test]
    fn test_empty_slots_have_no_command() {
        let app = App::new();
        let entries = app.menu_entries(Overlay::Unequip, &snapshot());
        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(|e| e.command.is_none()));
    }
}
