//! Integration test: autopilot simulation
//!
//! Runs the batch simulator end to end and checks that seeded runs are
//! reproducible and that the aggregated report is consistent with its runs.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use stagequest::character::PlayerClass;
use stagequest::simulator::{run_simulation, simulate_single_run, SimConfig};

fn small_config(seed: u64) -> SimConfig {
    SimConfig {
        num_runs: 4,
        seed: Some(seed),
        max_turns_per_run: 2_000,
        target_stage: 4,
        verbosity: 0,
        ..Default::default()
    }
}

// =============================================================================
// Reproducibility Tests
// =============================================================================

#[test]
fn test_seeded_simulation_is_reproducible() {
    let first = run_simulation(&small_config(2024));
    let second = run_simulation(&small_config(2024));

    assert_eq!(first.run_stats, second.run_stats);
    assert_eq!(first.stage_distribution, second.stage_distribution);
    assert_eq!(first.to_text(), second.to_text());
}

#[test]
fn test_single_run_matches_batch_run() {
    let config = small_config(77);
    let batch = run_simulation(&config);
    let single = simulate_single_run(&config, ChaCha8Rng::seed_from_u64(77));

    assert_eq!(batch.run_stats[0], single);
}

#[test]
fn test_seed_near_max_does_not_overflow() {
    let report = run_simulation(&SimConfig {
        num_runs: 2,
        max_turns_per_run: 200,
        ..small_config(u64::MAX)
    });
    assert_eq!(report.run_stats.len(), 2);
}

// =============================================================================
// Report Consistency Tests
// =============================================================================

#[test]
fn test_report_counts_add_up() {
    let report = run_simulation(&small_config(9));

    assert_eq!(report.num_runs, 4);
    assert_eq!(report.runs_completed + report.runs_timed_out, 4);
    let distributed: u32 = report.stage_distribution.values().sum();
    assert_eq!(distributed, 4);
    for run in &report.run_stats {
        assert!(run.highest_stage >= run.final_stage);
        assert!(run.boss_kills <= run.total_kills);
        assert_eq!(run.final_levels.len(), 2);
        assert_eq!(run.reached_target, run.highest_stage >= 4);
        assert!(run.total_turns <= 2_000);
    }
}

#[test]
fn test_solo_run_without_shop_buys_nothing() {
    let config = SimConfig {
        num_runs: 2,
        seed: Some(5),
        max_turns_per_run: 1_000,
        target_stage: 3,
        verbosity: 0,
        ..SimConfig::solo_hero_test()
    };
    let report = run_simulation(&config);

    for run in &report.run_stats {
        assert_eq!(run.items_bought, 0);
        assert_eq!(run.gold_spent, 0);
        assert_eq!(run.final_levels.len(), 1);
    }
    assert_eq!(config.party, vec![PlayerClass::Hero]);
}

#[test]
fn test_report_serializes_to_json() {
    let report = run_simulation(&small_config(11));
    let json = report.to_json().unwrap();

    assert!(json.contains("\"stage_distribution\""));
    assert!(json.contains("\"run_stats\""));
}
