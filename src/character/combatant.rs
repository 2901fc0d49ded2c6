use super::kinds::{CombatantKind, KindProfile};
use crate::core::constants::{EVASION_ROLL_MAX, MAX_EVASION, REVIVE_DIVISOR};
use crate::core::dice::Dice;
use crate::items::{Equipment, EquipmentSlot, ItemId, StatKey};
use serde::{Deserialize, Serialize};

/// Base numbers a combatant is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub max_hp: i32,
    pub max_mp: i32,
    pub attack: i32,
    pub defense: i32,
    pub evasion: i32,
}

/// The record shared by every fighter on either side.
///
/// `hp` stays within `[0, max_hp]` and `mp` within `[0, max_mp()]`. Once `hp`
/// reaches 0 the combatant is dead until [`Combatant::revive`] is called.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub name: String,
    pub kind: CombatantKind,
    pub max_hp: i32,
    pub hp: i32,
    /// Max MP before equipment bonuses.
    pub base_max_mp: i32,
    pub mp: i32,
    pub base_attack: i32,
    pub base_defense: i32,
    pub base_evasion: i32,
    pub alive: bool,
    pub equipment: Equipment,
    /// Set by the defend action; cleared after the next monster phase.
    #[serde(default)]
    pub defending: bool,
}

impl Combatant {
    pub fn new(name: impl Into<String>, kind: CombatantKind, stats: BaseStats) -> Self {
        Self {
            name: name.into(),
            kind,
            max_hp: stats.max_hp,
            hp: stats.max_hp,
            base_max_mp: stats.max_mp,
            mp: stats.max_mp,
            base_attack: stats.attack,
            base_defense: stats.defense,
            base_evasion: stats.evasion.clamp(0, MAX_EVASION),
            alive: stats.max_hp > 0,
            equipment: Equipment::new(),
            defending: false,
        }
    }

    pub fn profile(&self) -> &'static KindProfile {
        self.kind.profile()
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn effective_attack(&self) -> i32 {
        self.base_attack + self.equipment.total_bonus(StatKey::Attack)
    }

    pub fn effective_defense(&self) -> i32 {
        self.base_defense + self.equipment.total_bonus(StatKey::Defense)
    }

    /// Evasion including equipment, clamped to `[0, 100]`.
    pub fn effective_evasion(&self) -> i32 {
        (self.base_evasion + self.equipment.total_bonus(StatKey::Evasion)).clamp(0, MAX_EVASION)
    }

    /// Percentage points added to the critical multiplier.
    pub fn crit_bonus(&self) -> i32 {
        self.equipment.total_bonus(StatKey::CriticalDamage)
    }

    /// Max MP including equipped `mp` bonuses.
    pub fn max_mp(&self) -> i32 {
        self.base_max_mp + self.equipment.total_bonus(StatKey::Mp)
    }

    /// Applies damage and returns the HP actually lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let amount = amount.max(0);
        let before = self.hp;
        self.hp = (self.hp - amount).max(0);
        if self.hp == 0 {
            self.alive = false;
        }
        before - self.hp
    }

    /// Heals a living combatant and returns the HP actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if !self.alive {
            return 0;
        }
        let before = self.hp;
        self.hp = (self.hp + amount.max(0)).min(self.max_hp);
        self.hp - before
    }

    pub fn restore_mp(&mut self, amount: i32) -> i32 {
        let before = self.mp;
        self.mp = (self.mp + amount.max(0)).min(self.max_mp());
        self.mp - before
    }

    pub fn reduce_mp(&mut self, amount: i32) -> i32 {
        let before = self.mp;
        self.mp = (self.mp - amount.max(0)).max(0);
        before - self.mp
    }

    /// One evasion check against an incoming attack.
    pub fn try_evade(&self, dice: &mut impl Dice) -> bool {
        let roll = dice.roll_percent().clamp(1, EVASION_ROLL_MAX);
        roll <= self.effective_evasion()
    }

    /// Brings a dead combatant back at half HP and MP. Returns false if it was
    /// already alive.
    pub fn revive(&mut self) -> bool {
        if self.alive {
            return false;
        }
        self.hp = (self.max_hp / REVIVE_DIVISOR).max(1);
        self.mp = self.max_mp() / REVIVE_DIVISOR;
        self.alive = true;
        self.defending = false;
        true
    }

    /// Fully restores HP and MP. No effect on the dead.
    pub fn restore_full(&mut self) {
        if self.alive {
            self.hp = self.max_hp;
            self.mp = self.max_mp();
        }
    }

    /// Places `item` into `slot` and returns the previous occupant. MP is
    /// clamped if the swap lowered the maximum.
    pub fn set_slot(&mut self, slot: EquipmentSlot, item: Option<ItemId>) -> Option<ItemId> {
        let previous = self.equipment.set(slot, item);
        self.clamp_mp();
        previous
    }

    pub fn clamp_mp(&mut self) {
        self.mp = self.mp.clamp(0, self.max_mp().max(0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dice::scripted::ScriptedDice;

    fn dummy() -> Combatant {
        Combatant::new(
            "Dummy",
            CombatantKind::Hero,
            BaseStats {
                max_hp: 100,
                max_mp: 50,
                attack: 20,
                defense: 10,
                evasion: 10,
            },
        )
    }

    #[test]
    fn test_take_damage_clamps_at_zero() {
        let mut c = dummy();
        assert_eq!(c.take_damage(30), 30);
        assert_eq!(c.hp, 70);
        assert_eq!(c.take_damage(500), 70);
        assert_eq!(c.hp, 0);
        assert!(!c.is_alive());
        // Further damage on a dead combatant is harmless
        assert_eq!(c.take_damage(10), 0);
        assert_eq!(c.hp, 0);
    }

    #[test]
    fn test_negative_damage_ignored() {
        let mut c = dummy();
        assert_eq!(c.take_damage(-20), 0);
        assert_eq!(c.hp, 100);
    }

    #[test]
    fn test_heal_clamps_and_skips_dead() {
        let mut c = dummy();
        c.take_damage(20);
        assert_eq!(c.heal(50), 20);
        assert_eq!(c.hp, 100);
        c.take_damage(100);
        assert_eq!(c.heal(50), 0);
        assert_eq!(c.hp, 0);
    }

    #[test]
    fn test_mp_clamps() {
        let mut c = dummy();
        c.reduce_mp(80);
        assert_eq!(c.mp, 0);
        c.restore_mp(500);
        assert_eq!(c.mp, 50);
    }

    #[test]
    fn test_try_evade_uses_effective_evasion() {
        let c = dummy();
        let mut dice = ScriptedDice::new().percents(&[10, 11]);
        assert!(c.try_evade(&mut dice));
        assert!(!c.try_evade(&mut dice));
    }

    #[test]
    fn test_evasion_clamped() {
        let mut c = dummy();
        c.base_evasion = 98;
        c.set_slot(EquipmentSlot::Accessory, Some(ItemId::LuckyCharm));
        assert_eq!(c.effective_evasion(), 100);
        c.base_evasion = -20;
        assert_eq!(c.effective_evasion(), 0);
    }

    #[test]
    fn test_revive_half_hp_and_mp() {
        let mut c = dummy();
        assert!(!c.revive());
        c.take_damage(100);
        assert!(c.revive());
        assert!(c.is_alive());
        assert_eq!(c.hp, 50);
        assert_eq!(c.mp, 25);
    }

    #[test]
    fn test_unequip_mp_item_clamps_current_mp() {
        let mut c = dummy();
        c.set_slot(EquipmentSlot::Weapon, Some(ItemId::MagicStaff));
        assert_eq!(c.max_mp(), 70);
        c.restore_mp(20);
        assert_eq!(c.mp, 70);
        assert_eq!(c.set_slot(EquipmentSlot::Weapon, None), Some(ItemId::MagicStaff));
        assert_eq!(c.max_mp(), 50);
        assert_eq!(c.mp, 50);
    }

    #[test]
    fn test_effective_stats_include_equipment() {
        let mut c = dummy();
        c.set_slot(EquipmentSlot::Weapon, Some(ItemId::IronSword));
        c.set_slot(EquipmentSlot::Armor, Some(ItemId::ChainmailArmor));
        c.set_slot(EquipmentSlot::Accessory, Some(ItemId::CritRing));
        assert_eq!(c.effective_attack(), 30);
        assert_eq!(c.effective_defense(), 22);
        assert_eq!(c.crit_bonus(), 10);
    }
}
