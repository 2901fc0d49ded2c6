//! Engine core: constants, configuration, dice, errors and the game loop.

#![allow(unused_imports)]

pub mod config;
pub mod constants;
pub mod dice;
pub mod error;
pub mod game;
pub mod snapshot;
pub mod turn;

pub use config::*;
pub use constants::*;
pub use dice::*;
pub use error::*;
pub use game::*;
pub use snapshot::*;
pub use turn::*;
