//! Item catalog, equipment slots, and loot tables.

pub mod catalog;
pub mod drops;
pub mod equipment;
pub mod types;

pub use catalog::*;
pub use drops::*;
pub use equipment::*;
pub use types::*;
