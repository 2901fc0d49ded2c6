//! Combatant kinds and the per-kind parameter table.
//!
//! Everything that differs between heroes, sages, monsters and bosses lives in
//! a [`KindProfile`]; combat code looks the profile up instead of branching on
//! the kind.

use crate::core::constants::*;
use crate::items::LootTable;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombatantKind {
    Hero,
    Sage,
    Monster,
    Boss,
}

/// Heal/MP/XP granted to a party member for landing a killing blow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KillReward {
    pub hp: i32,
    pub mp: i32,
    pub xp: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindProfile {
    pub label: &'static str,
    pub special_multiplier: f64,
    /// 0 means the special is free and never rejected for lack of MP.
    pub special_mp_cost: i32,
    pub special_can_crit: bool,
    /// Chance an AI-controlled combatant picks its special over a plain attack.
    pub ai_special_chance: f64,
    pub kill_reward: Option<KillReward>,
    pub loot: Option<LootTable>,
}

const PLAYER_KILL_REWARD: KillReward = KillReward {
    hp: KILL_REWARD_HP,
    mp: KILL_REWARD_MP,
    xp: KILL_REWARD_XP,
};

static HERO: KindProfile = KindProfile {
    label: "Hero",
    special_multiplier: HERO_SPECIAL_MULTIPLIER,
    special_mp_cost: HERO_SPECIAL_MP_COST,
    special_can_crit: false,
    ai_special_chance: 0.0,
    kill_reward: Some(PLAYER_KILL_REWARD),
    loot: None,
};

static SAGE: KindProfile = KindProfile {
    label: "Sage",
    special_multiplier: SAGE_SPECIAL_MULTIPLIER,
    special_mp_cost: SAGE_SPECIAL_MP_COST,
    special_can_crit: false,
    ai_special_chance: 0.0,
    kill_reward: Some(PLAYER_KILL_REWARD),
    loot: None,
};

static MONSTER: KindProfile = KindProfile {
    label: "Monster",
    special_multiplier: MONSTER_SPECIAL_MULTIPLIER,
    special_mp_cost: 0,
    special_can_crit: false,
    ai_special_chance: MONSTER_SPECIAL_CHANCE,
    kill_reward: None,
    loot: Some(LootTable::Monster),
};

static BOSS: KindProfile = KindProfile {
    label: "Boss",
    special_multiplier: BOSS_SPECIAL_MULTIPLIER,
    special_mp_cost: BOSS_SPECIAL_MP_COST,
    special_can_crit: false,
    ai_special_chance: BOSS_SPECIAL_CHANCE,
    kill_reward: None,
    loot: Some(LootTable::Boss),
};

impl CombatantKind {
    pub fn profile(&self) -> &'static KindProfile {
        match self {
            CombatantKind::Hero => &HERO,
            CombatantKind::Sage => &SAGE,
            CombatantKind::Monster => &MONSTER,
            CombatantKind::Boss => &BOSS,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self, CombatantKind::Hero | CombatantKind::Sage)
    }
}
