//! Combatants: the shared record, player classes, monsters, and leveling.

pub mod combatant;
pub mod kinds;
pub mod monster;
pub mod player;
pub mod progression;

pub use combatant::*;
pub use kinds::*;
pub use monster::*;
pub use player::*;
pub use progression::*;
