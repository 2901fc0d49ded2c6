use super::types::{AttackKind, AttackOutcome, KillOutcome};
use crate::character::{Combatant, LevelUpReport, Monster, Player};
use crate::core::constants::*;
use crate::core::dice::{roll_chance, Dice};
use crate::core::error::ActionError;
use crate::items::roll_loot;

/// Damage after defense, never below the floor.
pub fn mitigated_damage(raw: i32, defense: i32) -> i32 {
    (raw - defense).max(MIN_DAMAGE)
}

/// Critical multiplier for `attacker`, or `None` if the crit roll fails.
pub fn roll_critical(attacker: &Combatant, dice: &mut impl Dice) -> Option<f64> {
    if roll_chance(BASE_CRIT_CHANCE, dice) {
        Some(BASE_CRIT_MULTIPLIER + attacker.crit_bonus() as f64 / CRIT_BONUS_DIVISOR)
    } else {
        None
    }
}

fn outcome(attacker: &Combatant, defender: &Combatant, kind: AttackKind) -> AttackOutcome {
    AttackOutcome {
        attacker: attacker.name.clone(),
        target: defender.name.clone(),
        kind,
        evaded: false,
        critical: false,
        damage: 0,
        killed: false,
        mp_spent: 0,
        defended: false,
    }
}

/// A party member's basic attack: evasion, then mitigation, then a crit roll.
pub fn resolve_attack(
    attacker: &Combatant,
    defender: &mut Combatant,
    dice: &mut impl Dice,
) -> AttackOutcome {
    let mut result = outcome(attacker, defender, AttackKind::Attack);
    if defender.try_evade(dice) {
        result.evaded = true;
        return result;
    }

    let mut damage = mitigated_damage(attacker.effective_attack(), defender.effective_defense());
    if let Some(multiplier) = roll_critical(attacker, dice) {
        damage = (damage as f64 * multiplier) as i32;
        result.critical = true;
    }

    result.damage = defender.take_damage(damage);
    result.killed = !defender.is_alive();
    result
}

/// A party member's special attack. Rejected without side effects when MP is
/// short; otherwise MP is spent even if the attack is evaded.
pub fn resolve_special(
    attacker: &mut Combatant,
    defender: &mut Combatant,
    dice: &mut impl Dice,
) -> Result<AttackOutcome, ActionError> {
    let profile = attacker.profile();
    let cost = profile.special_mp_cost;
    if attacker.mp < cost {
        return Err(ActionError::InsufficientMp {
            needed: cost,
            available: attacker.mp,
        });
    }

    let mut result = outcome(attacker, defender, AttackKind::Special);
    result.mp_spent = attacker.reduce_mp(cost);
    if defender.try_evade(dice) {
        result.evaded = true;
        return Ok(result);
    }

    let raw = (attacker.effective_attack() as f64 * profile.special_multiplier) as i32;
    let mut damage = mitigated_damage(raw, defender.effective_defense());
    if profile.special_can_crit {
        if let Some(multiplier) = roll_critical(attacker, dice) {
            damage = (damage as f64 * multiplier) as i32;
            result.critical = true;
        }
    }

    result.damage = defender.take_damage(damage);
    result.killed = !defender.is_alive();
    Ok(result)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonsterAction {
    Attack,
    Special,
}

/// AI choice for a monster's turn. A special the monster cannot pay for
/// falls back to a plain attack.
pub fn choose_monster_action(monster: &Combatant, dice: &mut impl Dice) -> MonsterAction {
    let profile = monster.profile();
    if roll_chance(profile.ai_special_chance, dice) && monster.mp >= profile.special_mp_cost {
        MonsterAction::Special
    } else {
        MonsterAction::Attack
    }
}

/// One monster turn against `target`. Monsters never crit; a defending
/// target takes half damage.
pub fn monster_act(
    monster: &mut Combatant,
    target: &mut Combatant,
    dice: &mut impl Dice,
) -> AttackOutcome {
    let action = choose_monster_action(monster, dice);
    let profile = monster.profile();
    let kind = match action {
        MonsterAction::Attack => AttackKind::Attack,
        MonsterAction::Special => AttackKind::Special,
    };

    let mut result = outcome(monster, target, kind);
    if action == MonsterAction::Special {
        result.mp_spent = monster.reduce_mp(profile.special_mp_cost);
    }
    if target.try_evade(dice) {
        result.evaded = true;
        return result;
    }

    let raw = match action {
        MonsterAction::Attack => monster.effective_attack(),
        MonsterAction::Special => (monster.effective_attack() as f64 * profile.special_multiplier) as i32,
    };
    let mut damage = mitigated_damage(raw, target.effective_defense());
    if target.defending {
        damage = (damage / DEFEND_DAMAGE_DIVISOR).max(MIN_DAMAGE);
        result.defended = true;
    }

    result.damage = target.take_damage(damage);
    result.killed = !target.is_alive();
    result
}

/// Loot and kill reward for `killer` defeating `monster`. The caller moves the
/// loot into the party inventory.
pub fn handle_monster_defeat(
    killer: &mut Player,
    member: usize,
    monster: &Monster,
    dice: &mut impl Dice,
) -> KillOutcome {
    let loot = roll_loot(monster.loot_table(), dice);
    let reward = killer.combatant.profile().kill_reward;
    let level_up = match reward {
        Some(r) => {
            killer.combatant.heal(r.hp);
            killer.combatant.restore_mp(r.mp);
            killer.gain_xp(r.xp)
        }
        None => LevelUpReport::default(),
    };
    tracing::debug!(
        killer = %killer.combatant.name,
        monster = %monster.name(),
        drops = loot.len(),
        "monster defeated"
    );
    KillOutcome {
        member,
        monster: monster.name().to_string(),
        boss: monster.is_boss(),
        loot,
        reward,
        level_up,
    }
}
