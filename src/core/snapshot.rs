//! Read-only views of a game for the presentation layer.

use super::turn::Phase;
use crate::character::{Combatant, Monster, Player};
use crate::combat::CombatLogEntry;
use crate::items::ItemId;
use crate::party::Party;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquipmentSnapshot {
    pub weapon: Option<String>,
    pub armor: Option<String>,
    pub accessory: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombatantSnapshot {
    pub name: String,
    pub alive: bool,
    pub hp: i32,
    pub max_hp: i32,
    pub mp: i32,
    pub max_mp: i32,
    pub attack: i32,
    pub defense: i32,
    pub evasion: i32,
}

impl From<&Combatant> for CombatantSnapshot {
    fn from(c: &Combatant) -> Self {
        Self {
            name: c.name.clone(),
            alive: c.is_alive(),
            hp: c.hp,
            max_hp: c.max_hp,
            mp: c.mp,
            max_mp: c.max_mp(),
            attack: c.effective_attack(),
            defense: c.effective_defense(),
            evasion: c.effective_evasion(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberSnapshot {
    #[serde(flatten)]
    pub stats: CombatantSnapshot,
    pub class: String,
    pub level: u32,
    pub xp: u32,
    pub upgrade_points: u32,
    pub defending: bool,
    pub equipment: EquipmentSnapshot,
}

impl From<&Player> for MemberSnapshot {
    fn from(p: &Player) -> Self {
        let eq = &p.combatant.equipment;
        let name = |slot: Option<crate::items::ItemId>| slot.map(|id| id.name().to_string());
        Self {
            stats: CombatantSnapshot::from(&p.combatant),
            class: p.class.name().to_string(),
            level: p.level,
            xp: p.xp,
            upgrade_points: p.upgrade_points,
            defending: p.combatant.defending,
            equipment: EquipmentSnapshot {
                weapon: name(eq.weapon),
                armor: name(eq.armor),
                accessory: name(eq.accessory),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonsterSnapshot {
    #[serde(flatten)]
    pub stats: CombatantSnapshot,
    pub boss: bool,
}

impl From<&Monster> for MonsterSnapshot {
    fn from(m: &Monster) -> Self {
        Self {
            stats: CombatantSnapshot::from(&m.combatant),
            boss: m.is_boss(),
        }
    }
}

/// One stocked inventory line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryRow {
    pub item: ItemId,
    pub name: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartySnapshot {
    pub gold: u32,
    /// Catalog order.
    pub inventory: Vec<InventoryRow>,
}

impl From<&Party> for PartySnapshot {
    fn from(party: &Party) -> Self {
        Self {
            gold: party.gold,
            inventory: party
                .inventory
                .iter()
                .map(|(item, quantity)| InventoryRow {
                    item,
                    name: item.name().to_string(),
                    quantity,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub stage: u32,
    pub phase: Phase,
    pub active_member: usize,
    pub members: Vec<MemberSnapshot>,
    pub monsters: Vec<MonsterSnapshot>,
    pub party: PartySnapshot,
    /// Most recent combat messages, oldest first.
    pub log: Vec<CombatLogEntry>,
}

impl GameSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
