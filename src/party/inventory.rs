use crate::items::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Shared party stock of unequipped items. Entries never sit at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Inventory {
    items: BTreeMap<ItemId, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quantity(&self, item: ItemId) -> u32 {
        self.items.get(&item).copied().unwrap_or(0)
    }

    pub fn contains(&self, item: ItemId) -> bool {
        self.quantity(item) > 0
    }

    pub fn add(&mut self, item: ItemId, quantity: u32) {
        if quantity == 0 {
            return;
        }
        *self.items.entry(item).or_insert(0) += quantity;
    }

    /// Removes `quantity` units. Returns false and changes nothing if
    /// fewer are held.
    pub fn remove(&mut self, item: ItemId, quantity: u32) -> bool {
        let held = self.quantity(item);
        if held < quantity {
            return false;
        }
        if held == quantity {
            self.items.remove(&item);
        } else {
            self.items.insert(item, held - quantity);
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, u32)> + '_ {
        self.items.iter().map(|(id, qty)| (*id, *qty))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_units(&self) -> u32 {
        self.items.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove() {
        let mut inv = Inventory::new();
        inv.add(ItemId::HealthPotion, 2);
        assert_eq!(inv.quantity(ItemId::HealthPotion), 2);
        assert!(inv.remove(ItemId::HealthPotion, 1));
        assert_eq!(inv.quantity(ItemId::HealthPotion), 1);
        assert!(inv.remove(ItemId::HealthPotion, 1));
        assert!(!inv.contains(ItemId::HealthPotion));
        assert!(inv.is_empty());
    }

    #[test]
    fn test_remove_more_than_held_fails() {
        let mut inv = Inventory::new();
        inv.add(ItemId::IronSword, 1);
        assert!(!inv.remove(ItemId::IronSword, 2));
        assert_eq!(inv.quantity(ItemId::IronSword), 1);
        assert!(!inv.remove(ItemId::CritRing, 1));
    }

    #[test]
    fn test_zero_add_creates_no_entry() {
        let mut inv = Inventory::new();
        inv.add(ItemId::ManaPotion, 0);
        assert!(inv.is_empty());
    }

    #[test]
    fn test_iter_sorted_by_catalog_order() {
        let mut inv = Inventory::new();
        inv.add(ItemId::MagicRing, 1);
        inv.add(ItemId::HealthPotion, 3);
        let listed: Vec<_> = inv.iter().collect();
        assert_eq!(
            listed,
            vec![(ItemId::HealthPotion, 3), (ItemId::MagicRing, 1)]
        );
        assert_eq!(inv.total_units(), 4);
    }
}
