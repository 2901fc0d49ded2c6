use crate::character::{KillReward, LevelUpReport};
use crate::core::constants::COMBAT_LOG_CAPACITY;
use crate::items::ItemId;
use serde::Serialize;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AttackKind {
    Attack,
    Special,
}

/// What a single attack did. Returned by every resolver in [`super::logic`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttackOutcome {
    pub attacker: String,
    pub target: String,
    pub kind: AttackKind,
    pub evaded: bool,
    pub critical: bool,
    pub damage: i32,
    pub killed: bool,
    pub mp_spent: i32,
    /// Damage was halved by the target's defend stance.
    pub defended: bool,
}

impl AttackOutcome {
    pub fn describe(&self) -> String {
        let verb = match self.kind {
            AttackKind::Attack => "attacks",
            AttackKind::Special => "unleashes a SPECIAL ATTACK on",
        };
        if self.evaded {
            return format!("{} {} {} but misses!", self.attacker, verb, self.target);
        }
        let mut text = if self.critical {
            format!(
                "Critical hit! {} {} {} for {} damage!",
                self.attacker, verb, self.target, self.damage
            )
        } else {
            format!(
                "{} {} {} for {} damage.",
                self.attacker, verb, self.target, self.damage
            )
        };
        if self.defended {
            text.push_str(" (defended)");
        }
        if self.killed {
            text.push_str(&format!(" {} falls!", self.target));
        }
        text
    }
}

/// Side effects of a party member killing a monster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KillOutcome {
    pub member: usize,
    pub monster: String,
    pub boss: bool,
    pub loot: Vec<ItemId>,
    pub reward: Option<KillReward>,
    pub level_up: LevelUpReport,
}

impl KillOutcome {
    pub fn describe(&self, killer: &str) -> String {
        let loot = if self.loot.is_empty() {
            "no loot".to_string()
        } else {
            self.loot
                .iter()
                .map(|id| id.name())
                .collect::<Vec<_>>()
                .join(", ")
        };
        match self.reward {
            Some(r) => format!(
                "{} defeats {}! Found {}. Recovers {} HP, {} MP and gains {} XP.",
                killer, self.monster, loot, r.hp, r.mp, r.xp
            ),
            None => format!("{} defeats {}! Found {}.", killer, self.monster, loot),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombatLogEntry {
    pub message: String,
    pub is_crit: bool,
    pub is_player_action: bool,
}

/// Rolling log of recent combat messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CombatLog {
    entries: VecDeque<CombatLogEntry>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(COMBAT_LOG_CAPACITY),
        }
    }

    pub fn push(&mut self, message: String, is_crit: bool, is_player_action: bool) {
        // Keep only the last COMBAT_LOG_CAPACITY entries
        if self.entries.len() >= COMBAT_LOG_CAPACITY {
            self.entries.pop_front();
        }
        self.entries.push_back(CombatLogEntry {
            message,
            is_crit,
            is_player_action,
        });
    }

    pub fn iter(&self) -> impl Iterator<Item = &CombatLogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// One selectable option in a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub index: usize,
    pub label: String,
}

/// Asked when a party member attacks and more than one enemy is alive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetRequest {
    pub attacker: String,
    pub special: bool,
    pub candidates: Vec<Choice>,
}

/// Asked when an item is used without naming a member in a multi-member party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberRequest {
    pub item: ItemId,
    pub candidates: Vec<Choice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combat_log_capacity() {
        let mut log = CombatLog::new();
        for i in 0..15 {
            log.push(format!("entry {}", i), false, true);
        }
        assert_eq!(log.len(), COMBAT_LOG_CAPACITY);
        assert_eq!(log.iter().next().map(|e| e.message.as_str()), Some("entry 5"));
    }

    #[test]
    fn test_describe_miss_and_kill() {
        let mut outcome = AttackOutcome {
            attacker: "Hero".into(),
            target: "Slime #1".into(),
            kind: AttackKind::Attack,
            evaded: true,
            critical: false,
            damage: 0,
            killed: false,
            mp_spent: 0,
            defended: false,
        };
        assert_eq!(outcome.describe(), "Hero attacks Slime #1 but misses!");
        outcome.evaded = false;
        outcome.damage = 12;
        outcome.killed = true;
        assert_eq!(
            outcome.describe(),
            "Hero attacks Slime #1 for 12 damage. Slime #1 falls!"
        );
    }
}
