//! Stage numbering and encounter generation.

pub mod encounter;
pub mod progression;

pub use encounter::*;
pub use progression::*;
