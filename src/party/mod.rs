//! The player side: members, shared gold and shared inventory.

pub mod inventory;

pub use inventory::*;

use crate::character::{LevelGrowth, LevelUpHeal, Player, PlayerClass};
use crate::core::error::{invariant_violation, ActionError};
use crate::items::{is_for_sale, EquipmentSlot, ItemId, ItemKind};
use serde::{Deserialize, Serialize};

/// Result of equipping or using an item on a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ItemOutcome {
    Equipped {
        member: usize,
        item: ItemId,
        slot: EquipmentSlot,
        replaced: Option<ItemId>,
    },
    Consumed {
        member: usize,
        item: ItemId,
        hp_restored: i32,
        mp_restored: i32,
    },
    Revived {
        member: usize,
        item: ItemId,
        hp: i32,
        mp: i32,
    },
}

impl ItemOutcome {
    pub fn describe(&self, party: &Party) -> String {
        let name = |idx: usize| {
            party
                .members
                .get(idx)
                .map_or("?", |p| p.name())
                .to_string()
        };
        match self {
            ItemOutcome::Equipped {
                member,
                item,
                slot,
                replaced,
            } => match replaced {
                Some(old) => format!(
                    "{} equipped {} in the {} slot, replacing {}.",
                    name(*member),
                    item,
                    slot,
                    old
                ),
                None => format!("{} equipped {} in the {} slot.", name(*member), item, slot),
            },
            ItemOutcome::Consumed {
                member,
                item,
                hp_restored,
                mp_restored,
            } => format!(
                "{} used {} (+{} HP, +{} MP).",
                name(*member),
                item,
                hp_restored,
                mp_restored
            ),
            ItemOutcome::Revived {
                member,
                item,
                hp,
                mp,
            } => format!(
                "{} was revived by {} with {} HP and {} MP!",
                name(*member),
                item,
                hp,
                mp
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub members: Vec<Player>,
    pub gold: u32,
    pub inventory: Inventory,
}

impl Party {
    pub fn new(members: Vec<Player>, gold: u32) -> Self {
        Self {
            members,
            gold,
            inventory: Inventory::new(),
        }
    }

    /// Builds a fresh party with one member per class, in order.
    pub fn from_classes(
        classes: &[PlayerClass],
        growth: LevelGrowth,
        level_up_heal: LevelUpHeal,
        gold: u32,
    ) -> Self {
        let members = classes
            .iter()
            .map(|class| Player::new(*class).with_progression(growth, level_up_heal))
            .collect();
        Self::new(members, gold)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn member(&self, index: usize) -> Result<&Player, ActionError> {
        self.members
            .get(index)
            .ok_or(ActionError::NoSuchMember(index))
    }

    pub fn member_mut(&mut self, index: usize) -> Result<&mut Player, ActionError> {
        self.members
            .get_mut(index)
            .ok_or(ActionError::NoSuchMember(index))
    }

    pub fn living_indices(&self) -> Vec<usize> {
        self.members
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_alive())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn first_living(&self) -> Option<usize> {
        self.members.iter().position(|p| p.is_alive())
    }

    pub fn is_defeated(&self) -> bool {
        self.members.iter().all(|p| !p.is_alive())
    }

    /// How many copies of `item` are currently worn across the party.
    pub fn count_equipped(&self, item: ItemId) -> usize {
        self.members
            .iter()
            .map(|p| p.combatant.equipment.count(item))
            .sum()
    }

    pub fn add_items(&mut self, items: &[ItemId]) {
        for item in items {
            self.inventory.add(*item, 1);
        }
    }

    /// Equips equipment or consumes a potion on `member`.
    pub fn equip_or_use(&mut self, member: usize, item: ItemId) -> Result<ItemOutcome, ActionError> {
        match item.item().kind {
            ItemKind::Equipment(_) => self.equip(member, item),
            ItemKind::Potion(_) => self.use_item(member, item),
        }
    }

    pub fn equip(&mut self, member: usize, item: ItemId) -> Result<ItemOutcome, ActionError> {
        let def = item.item();
        let slot = def.slot().ok_or_else(|| ActionError::NotEquipment {
            item: def.name.to_string(),
        })?;
        let player = self.member(member)?;
        if player.combatant.equipment.contains(item) {
            return Err(invariant_violation(ActionError::AlreadyEquipped {
                item: def.name.to_string(),
                name: player.name().to_string(),
            }));
        }
        if !self.inventory.remove(item, 1) {
            return Err(ActionError::ItemUnavailable {
                item: def.name.to_string(),
            });
        }

        let replaced = self.members[member]
            .combatant
            .set_slot(slot, Some(item));
        if let Some(old) = replaced {
            self.inventory.add(old, 1);
        }
        tracing::debug!(member, %item, %slot, "equipped");
        Ok(ItemOutcome::Equipped {
            member,
            item,
            slot,
            replaced,
        })
    }

    pub fn unequip(&mut self, member: usize, slot: EquipmentSlot) -> Result<ItemId, ActionError> {
        let player = self.member_mut(member)?;
        let Some(item) = player.combatant.equipment.get(slot) else {
            return Err(ActionError::EmptySlot {
                slot: slot.name().to_string(),
            });
        };
        player.combatant.set_slot(slot, None);
        self.inventory.add(item, 1);
        tracing::debug!(member, %item, %slot, "unequipped");
        Ok(item)
    }

    /// Consumes one potion on `member`.
    pub fn use_item(&mut self, member: usize, item: ItemId) -> Result<ItemOutcome, ActionError> {
        let def = item.item();
        let ItemKind::Potion(effect) = def.kind else {
            return Err(ActionError::NotUsable {
                item: def.name.to_string(),
            });
        };
        let player = self.member(member)?;
        if !self.inventory.contains(item) {
            return Err(ActionError::ItemUnavailable {
                item: def.name.to_string(),
            });
        }
        let alive = player.is_alive();
        if effect.revives && alive {
            return Err(ActionError::TargetAlive {
                name: player.name().to_string(),
            });
        }
        if !effect.revives && !alive {
            return Err(ActionError::TargetDefeated {
                name: player.name().to_string(),
            });
        }

        self.inventory.remove(item, 1);
        let c = &mut self.members[member].combatant;
        let outcome = if effect.revives {
            c.revive();
            ItemOutcome::Revived {
                member,
                item,
                hp: c.hp,
                mp: c.mp,
            }
        } else {
            ItemOutcome::Consumed {
                member,
                item,
                hp_restored: c.heal(effect.heal_amount),
                mp_restored: c.restore_mp(effect.mp_restore),
            }
        };
        tracing::debug!(member, %item, "potion used");
        Ok(outcome)
    }

    /// Buys one unit from the shop stock.
    pub fn buy_item(&mut self, item: ItemId) -> Result<u32, ActionError> {
        let def = item.item();
        if !is_for_sale(item) {
            return Err(ActionError::NotForSale {
                item: def.name.to_string(),
            });
        }
        if self.gold < def.price {
            return Err(ActionError::InsufficientGold {
                needed: def.price,
                available: self.gold,
            });
        }
        self.gold -= def.price;
        self.inventory.add(item, 1);
        tracing::debug!(%item, gold = self.gold, "bought");
        Ok(self.gold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn duo() -> Party {
        Party::from_classes(
            &[PlayerClass::Hero, PlayerClass::Sage],
            LevelGrowth::default(),
            LevelUpHeal::default(),
            0,
        )
    }

    #[test]
    fn test_equip_moves_item_out_of_inventory() {
        let mut party = duo();
        party.inventory.add(ItemId::IronSword, 1);
        let outcome = party.equip(0, ItemId::IronSword).unwrap();
        assert_eq!(
            outcome,
            ItemOutcome::Equipped {
                member: 0,
                item: ItemId::IronSword,
                slot: EquipmentSlot::Weapon,
                replaced: None
            }
        );
        assert_eq!(party.inventory.quantity(ItemId::IronSword), 0);
        assert_eq!(party.members[0].combatant.effective_attack(), 30);
    }

    #[test]
    fn test_equip_unequip_round_trip() {
        let mut party = duo();
        party.inventory.add(ItemId::LuckyCharm, 2);
        party.equip(1, ItemId::LuckyCharm).unwrap();
        assert_eq!(party.inventory.quantity(ItemId::LuckyCharm), 1);
        assert_eq!(party.unequip(1, EquipmentSlot::Accessory), Ok(ItemId::LuckyCharm));
        assert_eq!(party.inventory.quantity(ItemId::LuckyCharm), 2);
        assert!(party.members[1].combatant.equipment.accessory.is_none());
    }

    #[test]
    fn test_equip_replaces_slot_occupant() {
        let mut party = duo();
        party.inventory.add(ItemId::WoodenSword, 1);
        party.inventory.add(ItemId::IronSword, 1);
        party.equip(0, ItemId::WoodenSword).unwrap();
        let outcome = party.equip(0, ItemId::IronSword).unwrap();
        assert!(matches!(
            outcome,
            ItemOutcome::Equipped {
                replaced: Some(ItemId::WoodenSword),
                ..
            }
        ));
        assert_eq!(party.inventory.quantity(ItemId::WoodenSword), 1);
        assert_eq!(party.inventory.quantity(ItemId::IronSword), 0);
    }

    #[test]
    fn test_equip_rejections() {
        let mut party = duo();
        assert!(matches!(
            party.equip(0, ItemId::HealthPotion),
            Err(ActionError::NotEquipment { .. })
        ));
        assert!(matches!(
            party.equip(0, ItemId::CritRing),
            Err(ActionError::ItemUnavailable { .. })
        ));
        assert_eq!(
            party.equip(5, ItemId::CritRing),
            Err(ActionError::NoSuchMember(5))
        );
    }

    #[cfg(not(feature = "strict-invariants"))]
    #[test]
    fn test_equip_same_item_twice_rejected() {
        let mut party = duo();
        party.inventory.add(ItemId::CritRing, 2);
        party.equip(0, ItemId::CritRing).unwrap();
        let before = party.clone();
        assert!(matches!(
            party.equip(0, ItemId::CritRing),
            Err(ActionError::AlreadyEquipped { .. })
        ));
        assert_eq!(party, before);
        // Another member may still wear the second copy
        assert!(party.equip(1, ItemId::CritRing).is_ok());
        assert_eq!(party.count_equipped(ItemId::CritRing), 2);
    }

    #[test]
    fn test_unequip_empty_slot() {
        let mut party = duo();
        assert_eq!(
            party.unequip(0, EquipmentSlot::Armor),
            Err(ActionError::EmptySlot {
                slot: "armor".into()
            })
        );
        assert_eq!(
            party.unequip(7, EquipmentSlot::Armor),
            Err(ActionError::NoSuchMember(7))
        );
    }

    #[test]
    fn test_potions() {
        let mut party = duo();
        party.inventory.add(ItemId::HealthPotion, 1);
        party.members[0].combatant.take_damage(70);
        let outcome = party.use_item(0, ItemId::HealthPotion).unwrap();
        assert_eq!(
            outcome,
            ItemOutcome::Consumed {
                member: 0,
                item: ItemId::HealthPotion,
                hp_restored: 50,
                mp_restored: 0
            }
        );
        assert!(party.inventory.is_empty());
        assert!(matches!(
            party.use_item(0, ItemId::HealthPotion),
            Err(ActionError::ItemUnavailable { .. })
        ));
    }

    #[test]
    fn test_potion_target_state_checks() {
        let mut party = duo();
        party.inventory.add(ItemId::HealthPotion, 1);
        party.inventory.add(ItemId::RevivePotion, 1);
        assert!(matches!(
            party.use_item(1, ItemId::RevivePotion),
            Err(ActionError::TargetAlive { .. })
        ));
        party.members[1].combatant.take_damage(500);
        assert!(matches!(
            party.use_item(1, ItemId::HealthPotion),
            Err(ActionError::TargetDefeated { .. })
        ));
        assert_eq!(party.inventory.quantity(ItemId::HealthPotion), 1);
        let outcome = party.use_item(1, ItemId::RevivePotion).unwrap();
        assert_eq!(
            outcome,
            ItemOutcome::Revived {
                member: 1,
                item: ItemId::RevivePotion,
                hp: 40,
                mp: 50
            }
        );
        assert!(party.members[1].is_alive());
    }

    #[test]
    fn test_buy_item() {
        let mut party = duo();
        assert_eq!(
            party.buy_item(ItemId::HealthPotion),
            Err(ActionError::InsufficientGold {
                needed: 30,
                available: 0
            })
        );
        party.gold = 100;
        assert_eq!(party.buy_item(ItemId::HealthPotion), Ok(70));
        assert_eq!(party.inventory.quantity(ItemId::HealthPotion), 1);
        assert!(matches!(
            party.buy_item(ItemId::RevivePotion),
            Err(ActionError::NotForSale { .. })
        ));
        assert_eq!(party.gold, 70);
    }

    #[test]
    fn test_defeat_detection() {
        let mut party = duo();
        assert_eq!(party.living_indices(), vec![0, 1]);
        party.members[0].combatant.take_damage(500);
        assert_eq!(party.first_living(), Some(1));
        assert!(!party.is_defeated());
        party.members[1].combatant.take_damage(500);
        assert!(party.is_defeated());
        assert_eq!(party.first_living(), None);
    }
}
