//! Experience, level-ups and upgrade points.

use crate::core::constants::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stat growth applied once per level gained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelGrowth {
    pub max_hp: i32,
    pub max_mp: i32,
    pub attack: i32,
    pub defense: i32,
    pub evasion: i32,
}

impl Default for LevelGrowth {
    fn default() -> Self {
        Self {
            max_hp: LEVEL_UP_MAX_HP,
            max_mp: LEVEL_UP_MAX_MP,
            attack: LEVEL_UP_ATTACK,
            defense: LEVEL_UP_DEFENSE,
            evasion: LEVEL_UP_EVASION,
        }
    }
}

/// How much a level-up restores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelUpHeal {
    Fixed { hp: i32, mp: i32 },
    Full,
}

impl Default for LevelUpHeal {
    fn default() -> Self {
        LevelUpHeal::Fixed {
            hp: LEVEL_UP_HEAL_HP,
            mp: LEVEL_UP_HEAL_MP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LevelUpReport {
    pub xp_gained: u32,
    pub levels_gained: u32,
    pub new_level: u32,
    pub points_gained: u32,
}

impl LevelUpReport {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// Stats that can be raised with an upgrade point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeStat {
    Attack,
    Defense,
    Evasion,
    Mp,
    Hp,
}

impl UpgradeStat {
    pub const ALL: [UpgradeStat; 5] = [
        UpgradeStat::Attack,
        UpgradeStat::Defense,
        UpgradeStat::Evasion,
        UpgradeStat::Mp,
        UpgradeStat::Hp,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            UpgradeStat::Attack => "attack",
            UpgradeStat::Defense => "defense",
            UpgradeStat::Evasion => "evasion",
            UpgradeStat::Mp => "mp",
            UpgradeStat::Hp => "hp",
        }
    }

    pub fn increment(&self) -> i32 {
        match self {
            UpgradeStat::Attack => UPGRADE_ATTACK,
            UpgradeStat::Defense => UPGRADE_DEFENSE,
            UpgradeStat::Evasion => UPGRADE_EVASION,
            UpgradeStat::Mp => UPGRADE_MP,
            UpgradeStat::Hp => UPGRADE_HP,
        }
    }
}

impl fmt::Display for UpgradeStat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UpgradeStat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        UpgradeStat::ALL
            .into_iter()
            .find(|stat| stat.name() == wanted)
            .ok_or(wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upgrade_stat_parsing() {
        assert_eq!("ATTACK".parse::<UpgradeStat>(), Ok(UpgradeStat::Attack));
        assert_eq!(" hp ".parse::<UpgradeStat>(), Ok(UpgradeStat::Hp));
        assert_eq!("luck".parse::<UpgradeStat>(), Err("luck".to_string()));
    }

    #[test]
    fn test_defaults() {
        let growth = LevelGrowth::default();
        assert_eq!(growth.max_hp, 10);
        assert_eq!(growth.attack, 5);
        assert_eq!(
            LevelUpHeal::default(),
            LevelUpHeal::Fixed { hp: 10, mp: 10 }
        );
    }
}
