//! Attack resolution, monster AI, and the selection seam.

pub mod logic;
pub mod selection;
pub mod types;

pub use logic::*;
pub use selection::*;
pub use types::*;
