//! Scripted player used by the simulator.
//!
//! Between actions the autopilot tidies the party up (spends upgrade points,
//! equips better gear, drinks potions, shops); during a battle it picks the
//! weakest living monster and uses the special attack whenever MP allows.

use crate::character::{PlayerClass, UpgradeStat};
use crate::combat::{FirstChoice, FixedChoice};
use crate::core::dice::Dice;
use crate::core::error::ActionError;
use crate::core::game::Game;
use crate::core::turn::ActionReport;
use crate::items::{ItemId, StatKey};

/// Health potions kept in stock when shopping.
const POTION_RESERVE: u32 = 3;
const MANA_POTION_RESERVE: u32 = 2;
/// Drink a health potion below this fraction of max HP.
const HEAL_THRESHOLD: f64 = 0.4;

/// Counters for what the autopilot did outside of combat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Upkeep {
    pub points_spent: u32,
    pub items_equipped: u32,
    pub potions_used: u32,
    pub items_bought: u32,
    pub gold_spent: u32,
}

impl Upkeep {
    fn absorb(&mut self, other: Upkeep) {
        self.points_spent += other.points_spent;
        self.items_equipped += other.items_equipped;
        self.potions_used += other.potions_used;
        self.items_bought += other.items_bought;
        self.gold_spent += other.gold_spent;
    }
}

/// Stat the class invests its next upgrade point into.
fn preferred_stat(class: PlayerClass, points: u32) -> UpgradeStat {
    match (class, points % 3) {
        (PlayerClass::Hero, 0) => UpgradeStat::Attack,
        (PlayerClass::Hero, 1) => UpgradeStat::Hp,
        (PlayerClass::Hero, _) => UpgradeStat::Defense,
        (PlayerClass::Sage, 0) => UpgradeStat::Mp,
        (PlayerClass::Sage, 1) => UpgradeStat::Attack,
        (PlayerClass::Sage, _) => UpgradeStat::Hp,
    }
}

/// Rough worth of a piece of equipment.
fn gear_score(item: ItemId) -> i32 {
    let def = item.item();
    def.bonus(StatKey::Attack) * 2
        + def.bonus(StatKey::Defense) * 2
        + def.bonus(StatKey::Evasion) * 2
        + def.bonus(StatKey::CriticalDamage)
        + def.bonus(StatKey::Mp) / 2
}

#[derive(Debug, Clone, Default)]
pub struct AutoPilot {
    pub use_shop: bool,
}

impl AutoPilot {
    pub fn new(use_shop: bool) -> Self {
        Self { use_shop }
    }

    /// Out-of-turn housekeeping. None of these commands consume a turn.
    pub fn upkeep<D: Dice>(&self, game: &mut Game<D>) -> Upkeep {
        let mut done = Upkeep::default();
        done.absorb(self.spend_points(game));
        if self.use_shop {
            done.absorb(self.shop(game));
        }
        done.absorb(self.equip_upgrades(game));
        done.absorb(self.drink_potions(game));
        done
    }

    /// Issues the active member's battle command.
    pub fn act<D: Dice>(&self, game: &mut Game<D>) -> Result<ActionReport, ActionError> {
        let target = weakest_monster(game);
        let mut selector = FixedChoice {
            target,
            member: None,
        };
        let c = &game.party().members[game.active_member()].combatant;
        let cost = c.profile().special_mp_cost;
        let can_special = cost > 0 && c.mp >= cost;
        let low = (c.hp as f64) < c.max_hp as f64 * HEAL_THRESHOLD;
        if can_special {
            return game.player_special_attack(&mut selector);
        }
        if low && game.party().living_indices().len() > 1 {
            return game.player_defend();
        }
        game.player_attack(&mut selector)
    }

    fn spend_points<D: Dice>(&self, game: &mut Game<D>) -> Upkeep {
        let mut done = Upkeep::default();
        for member in 0..game.party().len() {
            loop {
                let player = &game.party().members[member];
                if player.upgrade_points == 0 {
                    break;
                }
                let stat = preferred_stat(player.class, player.upgrade_points);
                match game.upgrade_stat(member, stat.name()) {
                    Ok(_) => done.points_spent += 1,
                    Err(_) => break,
                }
            }
        }
        done
    }

    fn shop<D: Dice>(&self, game: &mut Game<D>) -> Upkeep {
        let mut done = Upkeep::default();
        let wanted = [
            (ItemId::HealthPotion, POTION_RESERVE),
            (ItemId::ManaPotion, MANA_POTION_RESERVE),
        ];
        for (item, reserve) in wanted {
            while game.party().inventory.quantity(item) < reserve {
                match game.buy_item(item) {
                    Ok(_) => {
                        done.items_bought += 1;
                        done.gold_spent += item.item().price;
                    }
                    Err(_) => break,
                }
            }
        }
        done
    }

    fn equip_upgrades<D: Dice>(&self, game: &mut Game<D>) -> Upkeep {
        let mut done = Upkeep::default();
        let gear: Vec<ItemId> = game
            .party()
            .inventory
            .iter()
            .map(|(item, _)| item)
            .filter(|item| item.item().is_equipment())
            .collect();

        for item in gear {
            let Some(slot) = item.item().slot() else {
                continue;
            };
            let best = game
                .party()
                .members
                .iter()
                .enumerate()
                .filter(|(_, p)| !p.combatant.equipment.contains(item))
                .map(|(i, p)| {
                    let current = p.combatant.equipment.get(slot).map_or(0, gear_score);
                    (i, gear_score(item) - current)
                })
                .filter(|(_, gain)| *gain > 0)
                .max_by_key(|(i, gain)| (*gain, std::cmp::Reverse(*i)));
            if let Some((member, _)) = best {
                if game
                    .equip_or_use_item(item, Some(member), &mut FirstChoice)
                    .is_ok()
                {
                    done.items_equipped += 1;
                }
            }
        }
        done
    }

    fn drink_potions<D: Dice>(&self, game: &mut Game<D>) -> Upkeep {
        let mut done = Upkeep::default();
        for member in 0..game.party().len() {
            let c = &game.party().members[member].combatant;
            let potion = if !c.is_alive() {
                Some(ItemId::RevivePotion)
            } else if (c.hp as f64) < c.max_hp as f64 * HEAL_THRESHOLD {
                Some(ItemId::HealthPotion)
            } else if c.mp < c.profile().special_mp_cost {
                Some(ItemId::ManaPotion)
            } else {
                None
            };
            let Some(potion) = potion else {
                continue;
            };
            if !game.party().inventory.contains(potion) {
                continue;
            }
            if game
                .equip_or_use_item(potion, Some(member), &mut FirstChoice)
                .is_ok()
            {
                done.potions_used += 1;
            }
        }
        done
    }
}

fn weakest_monster<D: Dice>(game: &Game<D>) -> Option<usize> {
    game.monsters()
        .iter()
        .enumerate()
        .filter(|(_, m)| m.is_alive())
        .min_by_key(|(_, m)| m.combatant.hp)
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::core::dice::scripted::ScriptedDice;

    fn duo() -> Game<ScriptedDice> {
        Game::with_dice(GameConfig::party(), ScriptedDice::new())
    }

    #[test]
    fn test_preferred_stat_cycles() {
        assert_eq!(preferred_stat(PlayerClass::Hero, 3), UpgradeStat::Attack);
        assert_eq!(preferred_stat(PlayerClass::Hero, 2), UpgradeStat::Defense);
        assert_eq!(preferred_stat(PlayerClass::Sage, 3), UpgradeStat::Mp);
    }

    #[test]
    fn test_gear_score_orders_weapons() {
        assert!(gear_score(ItemId::IronSword) > gear_score(ItemId::WoodenSword));
        assert!(gear_score(ItemId::ChainmailArmor) > gear_score(ItemId::LeatherArmor));
    }

    #[test]
    fn test_upkeep_spends_points_and_equips() {
        let mut game = duo();
        game.party_mut().members[0].upgrade_points = 3;
        game.party_mut().inventory.add(ItemId::WoodenSword, 1);
        let done = AutoPilot::new(false).upkeep(&mut game);
        assert_eq!(done.points_spent, 3);
        assert_eq!(done.items_equipped, 1);
        assert_eq!(game.party().members[0].upgrade_points, 0);
        assert!(game.party().inventory.is_empty());
    }

    #[test]
    fn test_upkeep_revives_and_heals() {
        let mut game = duo();
        game.party_mut().inventory.add(ItemId::RevivePotion, 1);
        game.party_mut().inventory.add(ItemId::HealthPotion, 1);
        game.party_mut().members[0].combatant.take_damage(70);
        game.party_mut().members[1].combatant.take_damage(200);
        let done = AutoPilot::new(false).upkeep(&mut game);
        assert_eq!(done.potions_used, 2);
        assert_eq!(game.party().members[0].combatant.hp, 80);
        assert!(game.party().members[1].is_alive());
    }

    #[test]
    fn test_shop_keeps_reserve_within_budget() {
        let mut game = duo();
        game.party_mut().gold = 100;
        let done = AutoPilot::new(true).upkeep(&mut game);
        assert_eq!(done.items_bought, 3);
        assert_eq!(done.gold_spent, 90);
        assert_eq!(game.party().gold, 10);
    }

    #[test]
    fn test_act_prefers_special() {
        let mut game = duo();
        let report = AutoPilot::new(false).act(&mut game).unwrap();
        assert_eq!(report.events.len(), 1);
        assert_eq!(game.party().members[0].combatant.mp, 35);
    }
}
