use super::types::ItemId;
use crate::core::constants::{BOSS_SECOND_DROP_CHANCE, MONSTER_DROP_CHANCE};
use crate::core::dice::{roll_chance, Dice};
use serde::{Deserialize, Serialize};

const MONSTER_LOOT: [ItemId; 6] = [
    ItemId::HealthPotion,
    ItemId::ManaPotion,
    ItemId::WoodenSword,
    ItemId::LeatherArmor,
    ItemId::LuckyCharm,
    ItemId::CritRing,
];

const BOSS_LOOT: [ItemId; 7] = [
    ItemId::IronSword,
    ItemId::ChainmailArmor,
    ItemId::LuckyCharm,
    ItemId::HealthPotion,
    ItemId::ManaPotion,
    ItemId::CritRing,
    ItemId::RevivePotion,
];

/// Which drop table a defeated monster rolls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LootTable {
    Monster,
    Boss,
}

impl LootTable {
    pub fn candidates(&self) -> &'static [ItemId] {
        match self {
            LootTable::Monster => &MONSTER_LOOT,
            LootTable::Boss => &BOSS_LOOT,
        }
    }
}

fn pick(table: LootTable, dice: &mut impl Dice) -> ItemId {
    let candidates = table.candidates();
    candidates[dice.pick_index(candidates.len())]
}

/// Rolls the drops for one defeated monster.
///
/// Regular monsters drop a single item half of the time. Bosses always drop
/// one item and have a further chance at a second.
pub fn roll_loot(table: LootTable, dice: &mut impl Dice) -> Vec<ItemId> {
    let mut drops = Vec::new();
    match table {
        LootTable::Monster => {
            if roll_chance(MONSTER_DROP_CHANCE, dice) {
                drops.push(pick(table, dice));
            }
        }
        LootTable::Boss => {
            drops.push(pick(table, dice));
            if roll_chance(BOSS_SECOND_DROP_CHANCE, dice) {
                drops.push(pick(table, dice));
            }
        }
    }
    drops
}
