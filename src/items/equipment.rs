use super::types::{ItemId, StatKey};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Accessory,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 3] = [
        EquipmentSlot::Weapon,
        EquipmentSlot::Armor,
        EquipmentSlot::Accessory,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "weapon",
            EquipmentSlot::Armor => "armor",
            EquipmentSlot::Accessory => "accessory",
        }
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EquipmentSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weapon" => Ok(EquipmentSlot::Weapon),
            "armor" => Ok(EquipmentSlot::Armor),
            "accessory" => Ok(EquipmentSlot::Accessory),
            other => Err(other.to_string()),
        }
    }
}

/// The three equipment slots of a combatant. Slots hold catalog ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<ItemId>,
    pub armor: Option<ItemId>,
    pub accessory: Option<ItemId>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<ItemId> {
        match slot {
            EquipmentSlot::Weapon => self.weapon,
            EquipmentSlot::Armor => self.armor,
            EquipmentSlot::Accessory => self.accessory,
        }
    }

    /// Puts `item` into `slot`, returning whatever was there before.
    pub fn set(&mut self, slot: EquipmentSlot, item: Option<ItemId>) -> Option<ItemId> {
        let target = match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Accessory => &mut self.accessory,
        };
        std::mem::replace(target, item)
    }

    pub fn iter_equipped(&self) -> impl Iterator<Item = ItemId> + '_ {
        EquipmentSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot))
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.iter_equipped().any(|equipped| equipped == item)
    }

    /// How many slots hold `item`.
    pub fn count(&self, item: ItemId) -> usize {
        self.iter_equipped().filter(|equipped| *equipped == item).count()
    }

    /// Sum of `stat` bonuses across every equipped item.
    pub fn total_bonus(&self, stat: StatKey) -> i32 {
        self.iter_equipped().map(|id| id.item().bonus(stat)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equipment_starts_empty() {
        let eq = Equipment::new();
        assert!(eq.weapon.is_none());
        assert!(eq.armor.is_none());
        assert_eq!(eq.iter_equipped().count(), 0);
    }

    #[test]
    fn test_set_returns_previous() {
        let mut eq = Equipment::new();
        assert_eq!(eq.set(EquipmentSlot::Weapon, Some(ItemId::WoodenSword)), None);
        assert_eq!(
            eq.set(EquipmentSlot::Weapon, Some(ItemId::IronSword)),
            Some(ItemId::WoodenSword)
        );
        assert_eq!(eq.get(EquipmentSlot::Weapon), Some(ItemId::IronSword));
        assert_eq!(eq.iter_equipped().count(), 1);
    }

    #[test]
    fn test_total_bonus_sums_all_slots() {
        let mut eq = Equipment::new();
        eq.set(EquipmentSlot::Weapon, Some(ItemId::MagicStaff));
        eq.set(EquipmentSlot::Armor, Some(ItemId::MysticRobe));
        eq.set(EquipmentSlot::Accessory, Some(ItemId::MagicRing));
        assert_eq!(eq.total_bonus(StatKey::Attack), 7);
        assert_eq!(eq.total_bonus(StatKey::Defense), 3);
        assert_eq!(eq.total_bonus(StatKey::Evasion), 4);
        assert_eq!(eq.total_bonus(StatKey::Mp), 45);
        assert_eq!(eq.total_bonus(StatKey::CriticalDamage), 0);
    }

    #[test]
    fn test_slot_parsing() {
        assert_eq!("Weapon".parse::<EquipmentSlot>(), Ok(EquipmentSlot::Weapon));
        assert_eq!("accessory".parse::<EquipmentSlot>(), Ok(EquipmentSlot::Accessory));
        assert!("boots".parse::<EquipmentSlot>().is_err());
    }

    #[test]
    fn test_contains_and_count() {
        let mut eq = Equipment::new();
        eq.set(EquipmentSlot::Accessory, Some(ItemId::CritRing));
        assert!(eq.contains(ItemId::CritRing));
        assert!(!eq.contains(ItemId::LuckyCharm));
        assert_eq!(eq.count(ItemId::CritRing), 1);
    }
}
