//! The fixed item catalog and shop stock.

use super::types::{Item, ItemId, ItemKind, PotionEffect, StatBonus, StatKey};
use crate::core::error::ActionError;

const fn potion(heal_amount: i32, mp_restore: i32, revives: bool) -> ItemKind {
    ItemKind::Potion(PotionEffect {
        heal_amount,
        mp_restore,
        revives,
    })
}

const fn bonus(stat: StatKey, amount: i32) -> StatBonus {
    StatBonus { stat, amount }
}

const WOODEN_SWORD: &[StatBonus] = &[bonus(StatKey::Attack, 5)];
const IRON_SWORD: &[StatBonus] = &[bonus(StatKey::Attack, 10)];
const LEATHER_ARMOR: &[StatBonus] = &[bonus(StatKey::Defense, 5)];
const CHAINMAIL_ARMOR: &[StatBonus] = &[bonus(StatKey::Defense, 12)];
const LUCKY_CHARM: &[StatBonus] = &[bonus(StatKey::Evasion, 5)];
const CRIT_RING: &[StatBonus] = &[bonus(StatKey::CriticalDamage, 10)];
const MAGIC_STAFF: &[StatBonus] = &[bonus(StatKey::Attack, 7), bonus(StatKey::Mp, 20)];
const MYSTIC_ROBE: &[StatBonus] = &[bonus(StatKey::Defense, 3), bonus(StatKey::Mp, 15)];
const MAGIC_RING: &[StatBonus] = &[bonus(StatKey::Evasion, 4), bonus(StatKey::Mp, 10)];

/// Indexed by `ItemId::index()`.
static CATALOG: [Item; 12] = [
    Item {
        id: ItemId::HealthPotion,
        name: "Health Potion",
        kind: potion(50, 0, false),
        price: 30,
        description: "Restores 50 HP",
    },
    Item {
        id: ItemId::ManaPotion,
        name: "Mana Potion",
        kind: potion(0, 30, false),
        price: 25,
        description: "Restores 30 MP",
    },
    Item {
        id: ItemId::RevivePotion,
        name: "Revive Potion",
        kind: potion(0, 0, true),
        price: 150,
        description: "Revives a fallen member with 50% HP and MP",
    },
    Item {
        id: ItemId::WoodenSword,
        name: "Wooden Sword",
        kind: ItemKind::Equipment(WOODEN_SWORD),
        price: 100,
        description: "Basic sword, +5 Attack",
    },
    Item {
        id: ItemId::IronSword,
        name: "Iron Sword",
        kind: ItemKind::Equipment(IRON_SWORD),
        price: 250,
        description: "Steel sword, +10 Attack",
    },
    Item {
        id: ItemId::LeatherArmor,
        name: "Leather Armor",
        kind: ItemKind::Equipment(LEATHER_ARMOR),
        price: 120,
        description: "Basic armor, +5 Defense",
    },
    Item {
        id: ItemId::ChainmailArmor,
        name: "Chainmail Armor",
        kind: ItemKind::Equipment(CHAINMAIL_ARMOR),
        price: 300,
        description: "Strong armor, +12 Defense",
    },
    Item {
        id: ItemId::LuckyCharm,
        name: "Lucky Charm",
        kind: ItemKind::Equipment(LUCKY_CHARM),
        price: 180,
        description: "+5% Evasion",
    },
    Item {
        id: ItemId::CritRing,
        name: "Critical Ring",
        kind: ItemKind::Equipment(CRIT_RING),
        price: 200,
        description: "+10% Critical Damage Bonus",
    },
    Item {
        id: ItemId::MagicStaff,
        name: "Magic Staff",
        kind: ItemKind::Equipment(MAGIC_STAFF),
        price: 200,
        description: "Sage's staff, +7 Attack & +20 MP",
    },
    Item {
        id: ItemId::MysticRobe,
        name: "Mystic Robe",
        kind: ItemKind::Equipment(MYSTIC_ROBE),
        price: 250,
        description: "Sage's robe, +3 Defense & +15 MP",
    },
    Item {
        id: ItemId::MagicRing,
        name: "Magic Ring",
        kind: ItemKind::Equipment(MAGIC_RING),
        price: 150,
        description: "Magic ring, +4% Evasion & +10 MP",
    },
];

pub const SHOP_STOCK: [ItemId; 10] = [
    ItemId::HealthPotion,
    ItemId::ManaPotion,
    ItemId::WoodenSword,
    ItemId::IronSword,
    ItemId::ChainmailArmor,
    ItemId::LuckyCharm,
    ItemId::CritRing,
    ItemId::MagicStaff,
    ItemId::MysticRobe,
    ItemId::MagicRing,
];

pub fn get_item(id: ItemId) -> &'static Item {
    &CATALOG[id.index()]
}

pub fn all_items() -> &'static [Item] {
    &CATALOG
}

pub fn is_for_sale(id: ItemId) -> bool {
    SHOP_STOCK.contains(&id)
}

/// Resolves a display name (case-insensitive) to a catalog id.
pub fn lookup_item(name: &str) -> Result<ItemId, ActionError> {
    name.parse::<ItemId>().map_err(ActionError::UnknownItem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_matches_ids() {
        for id in ItemId::ALL {
            assert_eq!(get_item(id).id, id);
        }
    }

    #[test]
    fn test_names_unique() {
        let mut names: Vec<&str> = all_items().iter().map(|i| i.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), all_items().len());
    }

    #[test]
    fn test_equipment_bonuses_positive() {
        for item in all_items() {
            for b in item.bonuses() {
                assert!(b.amount > 0, "{} has non-positive bonus", item.name);
            }
        }
    }

    #[test]
    fn test_lookup_item() {
        assert_eq!(lookup_item("critical ring"), Ok(ItemId::CritRing));
        assert_eq!(
            lookup_item("Excalibur"),
            Err(ActionError::UnknownItem("Excalibur".into()))
        );
    }

    #[test]
    fn test_revive_not_sold() {
        assert!(!is_for_sale(ItemId::RevivePotion));
        assert!(!is_for_sale(ItemId::LeatherArmor));
        assert!(is_for_sale(ItemId::HealthPotion));
    }

    #[test]
    fn test_shop_stock_is_everything_but_revive_and_starter_armor() {
        let unsold: Vec<ItemId> = all_items()
            .iter()
            .map(|item| item.id)
            .filter(|id| !is_for_sale(*id))
            .collect();
        assert_eq!(unsold, vec![ItemId::RevivePotion, ItemId::LeatherArmor]);
    }
}
