use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::equipment::EquipmentSlot;

/// Stable identity of a catalog item. Inventories and equipment slots store
/// these, never copies of the item definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemId {
    HealthPotion,
    ManaPotion,
    RevivePotion,
    WoodenSword,
    IronSword,
    LeatherArmor,
    ChainmailArmor,
    LuckyCharm,
    CritRing,
    MagicStaff,
    MysticRobe,
    MagicRing,
}

impl ItemId {
    pub const ALL: [ItemId; 12] = [
        ItemId::HealthPotion,
        ItemId::ManaPotion,
        ItemId::RevivePotion,
        ItemId::WoodenSword,
        ItemId::IronSword,
        ItemId::LeatherArmor,
        ItemId::ChainmailArmor,
        ItemId::LuckyCharm,
        ItemId::CritRing,
        ItemId::MagicStaff,
        ItemId::MysticRobe,
        ItemId::MagicRing,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Catalog definition for this id.
    pub fn item(&self) -> &'static Item {
        super::catalog::get_item(*self)
    }

    pub fn name(&self) -> &'static str {
        self.item().name
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ItemId {
    type Err = String;

    /// Looks an item up by its display name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ItemId::ALL
            .into_iter()
            .find(|id| id.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| wanted.to_string())
    }
}

/// Stat keys an equipment bonus can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKey {
    Attack,
    Defense,
    Evasion,
    CriticalDamage,
    Mp,
}

impl StatKey {
    pub fn name(&self) -> &'static str {
        match self {
            StatKey::Attack => "attack",
            StatKey::Defense => "defense",
            StatKey::Evasion => "evasion",
            StatKey::CriticalDamage => "critical_damage",
            StatKey::Mp => "mp",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatBonus {
    pub stat: StatKey,
    pub amount: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PotionEffect {
    pub heal_amount: i32,
    pub mp_restore: i32,
    /// Brings a defeated member back instead of healing a living one.
    pub revives: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ItemKind {
    Potion(PotionEffect),
    Equipment(&'static [StatBonus]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Item {
    pub id: ItemId,
    pub name: &'static str,
    pub kind: ItemKind,
    pub price: u32,
    pub description: &'static str,
}

impl Item {
    pub fn is_equipment(&self) -> bool {
        matches!(self.kind, ItemKind::Equipment(_))
    }

    pub fn is_potion(&self) -> bool {
        matches!(self.kind, ItemKind::Potion(_))
    }

    pub fn bonuses(&self) -> &'static [StatBonus] {
        match self.kind {
            ItemKind::Equipment(bonuses) => bonuses,
            ItemKind::Potion(_) => &[],
        }
    }

    /// Bonus this item grants to `stat` (0 when absent).
    pub fn bonus(&self, stat: StatKey) -> i32 {
        self.bonuses()
            .iter()
            .filter(|b| b.stat == stat)
            .map(|b| b.amount)
            .sum()
    }

    pub fn has_bonus(&self, stat: StatKey) -> bool {
        self.bonuses().iter().any(|b| b.stat == stat)
    }

    /// Slot an equipment item goes into: attack wins over defense, anything
    /// else is an accessory.
    pub fn slot(&self) -> Option<EquipmentSlot> {
        if !self.is_equipment() {
            return None;
        }
        if self.has_bonus(StatKey::Attack) {
            Some(EquipmentSlot::Weapon)
        } else if self.has_bonus(StatKey::Defense) {
            Some(EquipmentSlot::Armor)
        } else {
            Some(EquipmentSlot::Accessory)
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ItemKind::Potion(effect) => {
                let mut effects = Vec::new();
                if effect.revives {
                    effects.push("Revives a fallen member".to_string());
                }
                if effect.heal_amount > 0 {
                    effects.push(format!("Heals {} HP", effect.heal_amount));
                }
                if effect.mp_restore > 0 {
                    effects.push(format!("Restores {} MP", effect.mp_restore));
                }
                write!(f, "{} (Potion): {}", self.name, effects.join(", "))
            }
            ItemKind::Equipment(bonuses) => {
                let parts: Vec<String> = bonuses
                    .iter()
                    .map(|b| format!("{} +{}", b.stat.name(), b.amount))
                    .collect();
                write!(f, "{} (Equipment): {}", self.name, parts.join(" | "))
            }
        }
    }
}
