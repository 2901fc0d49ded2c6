//! Headless balance simulator for Monte Carlo analysis.
//!
//! Runs many seeded sessions with a scripted player to analyze:
//! - How far parties get and how often they wipe
//! - Kill, loot and crit rates
//! - Gold and potion consumption
//!
//! The simulator drives `core::game::Game` through its public commands, so
//! results match real gameplay behavior.

mod autopilot;
mod config;
mod report;
mod runner;

pub use autopilot::{AutoPilot, Upkeep};
pub use config::SimConfig;
pub use report::SimReport;
pub use runner::{run_simulation, simulate_single_run, RunStats};
