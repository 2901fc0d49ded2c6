//! Simulation configuration.

use crate::character::PlayerClass;
use crate::core::config::GameConfig;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Maximum party actions per run before timeout
    pub max_turns_per_run: u64,

    /// Stage the party has to reach for a run to count as completed
    pub target_stage: u32,

    /// Party composition, in turn order
    pub party: Vec<PlayerClass>,

    /// Whether the autopilot spends gold at the shop
    pub use_shop: bool,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 200,
            seed: None,
            max_turns_per_run: 20_000,
            target_stage: 10,
            party: vec![PlayerClass::Hero, PlayerClass::Sage],
            use_shop: true,
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick config for checking early-stage balance.
    pub fn stage_balance_test(target_stage: u32) -> Self {
        Self {
            num_runs: 50,
            target_stage,
            ..Default::default()
        }
    }

    /// A lone hero, no shopping.
    pub fn solo_hero_test() -> Self {
        Self {
            party: vec![PlayerClass::Hero],
            use_shop: false,
            ..Default::default()
        }
    }

    /// Game configuration for one run.
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            party: self.party.clone(),
            seed: None,
            ..Default::default()
        }
    }
}
