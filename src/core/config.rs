//! Runtime policies for a game session.

use crate::character::{LevelGrowth, LevelUpHeal, PlayerClass};
use crate::core::constants::STARTING_GOLD;
use crate::stage::MonsterCountPolicy;
use serde::{Deserialize, Serialize};

/// Who receives the stage-victory XP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum XpShare {
    /// Every member, fallen or not.
    #[default]
    AllMembers,
    /// Only members still standing when the last monster falls.
    LivingMembers,
}

/// Configuration for a game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Party composition, in turn order
    pub party: Vec<PlayerClass>,

    /// Gold the party starts with (and gets back after a wipe)
    pub starting_gold: u32,

    /// Seed for the game's RNG (None = from entropy)
    pub seed: Option<u64>,

    pub xp_share: XpShare,
    pub level_growth: LevelGrowth,
    pub level_up_heal: LevelUpHeal,
    pub monster_count: MonsterCountPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            party: vec![PlayerClass::Hero, PlayerClass::Sage],
            starting_gold: STARTING_GOLD,
            seed: None,
            xp_share: XpShare::default(),
            level_growth: LevelGrowth::default(),
            level_up_heal: LevelUpHeal::default(),
            monster_count: MonsterCountPolicy::default(),
        }
    }
}

impl GameConfig {
    /// A lone hero; stage 1 still spawns a single monster.
    pub fn solo() -> Self {
        Self {
            party: vec![PlayerClass::Hero],
            ..Default::default()
        }
    }

    /// Hero and Sage side by side.
    pub fn party() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Party classes, falling back to a lone hero when the list is empty.
    pub fn party_classes(&self) -> Vec<PlayerClass> {
        if self.party.is_empty() {
            vec![PlayerClass::Hero]
        } else {
            self.party.clone()
        }
    }
}
