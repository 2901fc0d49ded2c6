//! StageQuest - turn-based party battler library
//!
//! This module exposes the game engine for the terminal front-end, the
//! balance simulator and tests.

pub mod character;
pub mod combat;
pub mod core;
pub mod items;
pub mod party;
pub mod simulator;
pub mod stage;
