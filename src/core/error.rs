//! Rejections returned by engine commands.
//!
//! A rejected command never mutates game state. Every variant renders a
//! player-facing message through `Display`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("Not enough MP for a special attack (need {needed}, have {available}).")]
    InsufficientMp { needed: i32, available: i32 },

    #[error("Not enough gold (need {needed}, have {available}).")]
    InsufficientGold { needed: u32, available: u32 },

    #[error("No unequipped {item} left in the inventory.")]
    ItemUnavailable { item: String },

    #[error("No upgrade points available.")]
    NoUpgradePoints,

    #[error("Invalid stat '{0}'.")]
    InvalidStat(String),

    #[error("Invalid slot '{0}'.")]
    InvalidSlot(String),

    #[error("Unknown item '{0}'.")]
    UnknownItem(String),

    #[error("{item} cannot be equipped.")]
    NotEquipment { item: String },

    #[error("{item} cannot be used.")]
    NotUsable { item: String },

    #[error("{item} is not sold here.")]
    NotForSale { item: String },

    #[error("No party member at position {0}.")]
    NoSuchMember(usize),

    #[error("Nothing is equipped in the {slot} slot.")]
    EmptySlot { slot: String },

    #[error("{name} has been defeated.")]
    TargetDefeated { name: String },

    #[error("{name} is still standing.")]
    TargetAlive { name: String },

    #[error("Nobody in the party can use {item} right now.")]
    NoEligibleMember { item: String },

    #[error("There is no battle to act in right now.")]
    NotYourTurn,

    #[error("{item} is already equipped by {name}.")]
    AlreadyEquipped { item: String, name: String },
}

impl ActionError {
    /// Errors that can only come from a caller that ignored the turn order or
    /// its own equipment view.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            ActionError::NotYourTurn | ActionError::AlreadyEquipped { .. }
        )
    }
}

/// Surfaces an invariant violation: logged and returned, or a panic when
/// built with `strict-invariants`.
pub fn invariant_violation(error: ActionError) -> ActionError {
    tracing::warn!(%error, "rejected out-of-contract command");
    if cfg!(feature = "strict-invariants") {
        panic!("invariant violation: {error}");
    }
    error
}
