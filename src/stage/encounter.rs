use crate::character::Monster;
use crate::core::constants::{BOSS_STAGE_INTERVAL, MAX_MONSTERS_PER_STAGE};
use serde::{Deserialize, Serialize};

/// How many regular monsters a non-boss stage spawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MonsterCountPolicy {
    /// One monster on stage 1, then the maximum.
    #[default]
    FirstStageSingle,
    /// Always this many, clamped to 1..=2.
    Fixed(usize),
}

impl MonsterCountPolicy {
    pub fn count_for(&self, stage: u32) -> usize {
        match self {
            MonsterCountPolicy::FirstStageSingle => {
                if stage <= 1 {
                    1
                } else {
                    MAX_MONSTERS_PER_STAGE
                }
            }
            MonsterCountPolicy::Fixed(n) => (*n).clamp(1, MAX_MONSTERS_PER_STAGE),
        }
    }
}

pub fn is_boss_stage(stage: u32) -> bool {
    stage % BOSS_STAGE_INTERVAL == 0
}

pub fn boss_tier(stage: u32) -> u32 {
    stage / BOSS_STAGE_INTERVAL
}

/// Monsters for `stage`: a single boss on every third stage, otherwise
/// regular monsters per `policy`.
pub fn generate_encounter(stage: u32, policy: MonsterCountPolicy) -> Vec<Monster> {
    let stage = stage.max(1);
    if is_boss_stage(stage) {
        return vec![Monster::boss(boss_tier(stage))];
    }
    (1..=policy.count_for(stage))
        .map(|number| Monster::regular(stage, number))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_three_is_tier_one_boss() {
        let monsters = generate_encounter(3, MonsterCountPolicy::default());
        assert_eq!(monsters.len(), 1);
        assert!(monsters[0].is_boss());
        assert_eq!(monsters[0].tier, 1);
        assert_eq!(monsters[0].combatant.max_hp, 150);
    }

    #[test]
    fn test_boss_every_third_stage() {
        for stage in 1..=30 {
            let monsters = generate_encounter(stage, MonsterCountPolicy::default());
            if stage % 3 == 0 {
                assert_eq!(monsters.len(), 1);
                assert_eq!(monsters[0].tier, stage / 3);
            } else {
                assert!(monsters.iter().all(|m| !m.is_boss()));
            }
        }
    }

    #[test]
    fn test_default_policy_counts() {
        assert_eq!(generate_encounter(1, MonsterCountPolicy::default()).len(), 1);
        assert_eq!(generate_encounter(2, MonsterCountPolicy::default()).len(), 2);
        assert_eq!(generate_encounter(4, MonsterCountPolicy::default()).len(), 2);
    }

    #[test]
    fn test_fixed_policy_clamped() {
        assert_eq!(generate_encounter(1, MonsterCountPolicy::Fixed(2)).len(), 2);
        assert_eq!(generate_encounter(2, MonsterCountPolicy::Fixed(1)).len(), 1);
        assert_eq!(generate_encounter(2, MonsterCountPolicy::Fixed(9)).len(), 2);
        assert_eq!(generate_encounter(2, MonsterCountPolicy::Fixed(0)).len(), 1);
    }

    #[test]
    fn test_regular_names_numbered() {
        let monsters = generate_encounter(2, MonsterCountPolicy::default());
        assert_eq!(monsters[0].name(), "Slime #1");
        assert_eq!(monsters[1].name(), "Slime #2");
    }
}
