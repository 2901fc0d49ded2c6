//! Main simulation runner driving the real game engine.
//!
//! Every run builds a [`Game`] over its own seeded `ChaCha8Rng` and lets the
//! [`AutoPilot`] play it. Statistics are tracked externally from the
//! [`ActionReport`] events each command returns.

use super::autopilot::AutoPilot;
use super::config::SimConfig;
use super::report::SimReport;
use crate::core::dice::Dice;
use crate::core::game::Game;
use crate::core::turn::{ActionReport, Phase, TurnEvent};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Results of one simulated playthrough.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunStats {
    pub final_stage: u32,
    pub highest_stage: u32,
    pub stages_cleared: u32,
    pub bosses_defeated: u32,
    pub party_defeats: u32,
    pub total_turns: u64,
    pub total_kills: u64,
    pub boss_kills: u64,
    pub member_deaths: u64,
    pub critical_hits: u64,
    pub loot_drops: u64,
    pub items_bought: u32,
    pub potions_used: u32,
    pub gold_spent: u32,
    pub final_levels: Vec<u32>,
    pub reached_target: bool,
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed.wrapping_add(run_idx as u64)),
            None => ChaCha8Rng::from_entropy(),
        };

        let r = simulate_single_run(config, rng);
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - Stage {} (best {}), Levels {:?}, Kills {}, Boss Kills {}, Wipes {}",
                run_idx + 1,
                config.num_runs,
                r.final_stage,
                r.highest_stage,
                r.final_levels,
                r.total_kills,
                r.boss_kills,
                r.party_defeats
            );
        }
        all_runs.push(r);
    }

    SimReport::from_runs(all_runs, config.target_stage, config.max_turns_per_run)
}

/// Accumulates data from command reports.
#[derive(Debug, Default)]
struct SimStats {
    turns: u64,
    kills: u64,
    boss_kills: u64,
    member_deaths: u64,
    critical_hits: u64,
    loot_drops: u64,
}

impl SimStats {
    fn process_report(&mut self, report: &ActionReport) {
        for event in &report.events {
            match event {
                TurnEvent::MemberAttack { outcome, .. } if outcome.critical => {
                    self.critical_hits += 1;
                }
                TurnEvent::MonsterDefeated { kill, .. } => {
                    self.kills += 1;
                    self.loot_drops += kill.loot.len() as u64;
                    if kill.boss {
                        self.boss_kills += 1;
                    }
                }
                TurnEvent::MemberDefeated { .. } => self.member_deaths += 1,
                _ => {}
            }
        }
    }
}

/// Plays one session until the target stage is reached or the turn budget
/// runs out.
pub fn simulate_single_run<D: Dice>(config: &SimConfig, dice: D) -> RunStats {
    let mut game = Game::with_dice(config.game_config(), dice);
    let pilot = AutoPilot::new(config.use_shop);
    let mut stats = SimStats::default();
    let mut items_bought = 0;
    let mut potions_used = 0;
    let mut gold_spent = 0;

    while game.progression().highest_stage < config.target_stage
        && stats.turns < config.max_turns_per_run
    {
        let upkeep = pilot.upkeep(&mut game);
        items_bought += upkeep.items_bought;
        potions_used += upkeep.potions_used;
        gold_spent += upkeep.gold_spent;

        let result = match game.phase() {
            Phase::StageCleared => game.start_next_stage(),
            Phase::Battle => {
                stats.turns += 1;
                pilot.act(&mut game)
            }
        };
        match result {
            Ok(report) => stats.process_report(&report),
            Err(error) => {
                tracing::warn!(%error, "autopilot command rejected");
                break;
            }
        }
    }

    let progression = game.progression();
    RunStats {
        final_stage: progression.stage,
        highest_stage: progression.highest_stage,
        stages_cleared: progression.stages_cleared,
        bosses_defeated: progression.bosses_defeated,
        party_defeats: progression.defeats,
        total_turns: stats.turns,
        total_kills: stats.kills,
        boss_kills: stats.boss_kills,
        member_deaths: stats.member_deaths,
        critical_hits: stats.critical_hits,
        loot_drops: stats.loot_drops,
        items_bought,
        potions_used,
        gold_spent,
        final_levels: game.party().members.iter().map(|p| p.level).collect(),
        reached_target: progression.highest_stage >= config.target_stage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick(seed: u64) -> SimConfig {
        SimConfig {
            num_runs: 3,
            seed: Some(seed),
            max_turns_per_run: 2_000,
            target_stage: 4,
            verbosity: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_single_run() {
        let config = quick(12345);
        let stats = simulate_single_run(&config, ChaCha8Rng::seed_from_u64(12345));

        assert!(stats.total_turns > 0);
        assert!(stats.total_kills > 0);
        assert_eq!(stats.final_levels.len(), 2);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = quick(42);
        let a = simulate_single_run(&config, ChaCha8Rng::seed_from_u64(42));
        let b = simulate_single_run(&config, ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);

        let first = run_simulation(&config);
        let second = run_simulation(&config);
        assert_eq!(first.run_stats, second.run_stats);
    }

    #[test]
    fn test_full_simulation() {
        let report = run_simulation(&quick(7));
        assert_eq!(report.num_runs, 3);
        assert!(report.avg_total_kills > 0.0);
    }

    #[test]
    fn test_turn_budget_stops_run() {
        let config = SimConfig {
            max_turns_per_run: 5,
            target_stage: 50,
            ..quick(3)
        };
        let stats = simulate_single_run(&config, ChaCha8Rng::seed_from_u64(3));
        assert_eq!(stats.total_turns, 5);
        assert!(!stats.reached_target);
    }
}
