//! Events produced by engine commands.
//!
//! Every command on [`crate::core::game::Game`] returns an [`ActionReport`]
//! listing what happened, in order. The presentation layer renders the
//! messages and reacts to the battle-ending events; the engine never
//! touches the screen.

use crate::character::{LevelUpReport, UpgradeStat};
use crate::combat::{AttackOutcome, KillOutcome};
use crate::items::{EquipmentSlot, ItemId};
use crate::party::ItemOutcome;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// Party members act in order; the monster phase runs inside the command
    /// that finishes the round.
    Battle,
    /// All monsters are down. Waiting for `start_next_stage`.
    StageCleared,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VictoryReport {
    pub stage_cleared: u32,
    pub next_stage: u32,
    /// XP granted to each eligible member.
    pub xp_each: u32,
    pub xp_recipients: Vec<usize>,
    pub gold: u32,
    /// Everything dropped during the encounter. Already in the inventory.
    pub loot: Vec<ItemId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TurnEvent {
    /// A member attacked or used a special attack.
    MemberAttack {
        member: usize,
        outcome: AttackOutcome,
        message: String,
    },

    MemberDefend {
        member: usize,
        message: String,
    },

    /// A member's blow killed a monster; loot went to the inventory.
    MonsterDefeated {
        kill: KillOutcome,
        message: String,
    },

    LevelUp {
        member: usize,
        report: LevelUpReport,
        message: String,
    },

    MonsterAttack {
        monster: usize,
        target: usize,
        outcome: AttackOutcome,
        message: String,
    },

    MemberDefeated {
        member: usize,
        message: String,
    },

    /// Every monster is down. Rewards are already applied.
    Victory {
        report: VictoryReport,
        message: String,
    },

    /// The whole party fell. The session has been reset to stage 1.
    PartyDefeated {
        stage_reached: u32,
        message: String,
    },

    StageStarted {
        stage: u32,
        boss: bool,
        monsters: Vec<String>,
        message: String,
    },

    ItemUsed {
        outcome: ItemOutcome,
        message: String,
    },

    Unequipped {
        member: usize,
        item: ItemId,
        slot: EquipmentSlot,
        message: String,
    },

    ItemBought {
        item: ItemId,
        gold_left: u32,
        message: String,
    },

    StatUpgraded {
        member: usize,
        stat: UpgradeStat,
        points_left: u32,
        message: String,
    },
}

impl TurnEvent {
    pub fn message(&self) -> &str {
        match self {
            TurnEvent::MemberAttack { message, .. }
            | TurnEvent::MemberDefend { message, .. }
            | TurnEvent::MonsterDefeated { message, .. }
            | TurnEvent::LevelUp { message, .. }
            | TurnEvent::MonsterAttack { message, .. }
            | TurnEvent::MemberDefeated { message, .. }
            | TurnEvent::Victory { message, .. }
            | TurnEvent::PartyDefeated { message, .. }
            | TurnEvent::StageStarted { message, .. }
            | TurnEvent::ItemUsed { message, .. }
            | TurnEvent::Unequipped { message, .. }
            | TurnEvent::ItemBought { message, .. }
            | TurnEvent::StatUpgraded { message, .. } => message,
        }
    }
}

/// Everything one command did, in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ActionReport {
    pub events: Vec<TurnEvent>,
}

impl ActionReport {
    pub fn push(&mut self, event: TurnEvent) {
        self.events.push(event);
    }

    pub fn messages(&self) -> Vec<&str> {
        self.events.iter().map(|e| e.message()).collect()
    }

    pub fn victory(&self) -> Option<&VictoryReport> {
        self.events.iter().find_map(|e| match e {
            TurnEvent::Victory { report, .. } => Some(report),
            _ => None,
        })
    }

    pub fn is_defeat(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, TurnEvent::PartyDefeated { .. }))
    }

    pub fn monster_attacks(&self) -> impl Iterator<Item = &AttackOutcome> {
        self.events.iter().filter_map(|e| match e {
            TurnEvent::MonsterAttack { outcome, .. } => Some(outcome),
            _ => None,
        })
    }

    pub fn kills(&self) -> impl Iterator<Item = &KillOutcome> {
        self.events.iter().filter_map(|e| match e {
            TurnEvent::MonsterDefeated { kill, .. } => Some(kill),
            _ => None,
        })
    }
}
