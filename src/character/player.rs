use super::combatant::{BaseStats, Combatant};
use super::kinds::CombatantKind;
use super::progression::{LevelGrowth, LevelUpHeal, LevelUpReport, UpgradeStat};
use crate::core::constants::*;
use crate::core::error::ActionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerClass {
    Hero,
    Sage,
}

impl PlayerClass {
    pub fn kind(&self) -> CombatantKind {
        match self {
            PlayerClass::Hero => CombatantKind::Hero,
            PlayerClass::Sage => CombatantKind::Sage,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().profile().label
    }

    pub fn base_stats(&self) -> BaseStats {
        match self {
            PlayerClass::Hero => BaseStats {
                max_hp: HERO_MAX_HP,
                max_mp: HERO_MAX_MP,
                attack: HERO_ATTACK,
                defense: HERO_DEFENSE,
                evasion: HERO_EVASION,
            },
            PlayerClass::Sage => BaseStats {
                max_hp: SAGE_MAX_HP,
                max_mp: SAGE_MAX_MP,
                attack: SAGE_ATTACK,
                defense: SAGE_DEFENSE,
                evasion: SAGE_EVASION,
            },
        }
    }
}

impl fmt::Display for PlayerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlayerClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hero" => Ok(PlayerClass::Hero),
            "sage" => Ok(PlayerClass::Sage),
            other => Err(other.to_string()),
        }
    }
}

/// A party member: a combatant plus leveling state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub combatant: Combatant,
    pub class: PlayerClass,
    /// Always below `XP_PER_LEVEL` between grants.
    pub xp: u32,
    pub level: u32,
    pub upgrade_points: u32,
    pub growth: LevelGrowth,
    pub level_up_heal: LevelUpHeal,
}

impl Player {
    pub fn new(class: PlayerClass) -> Self {
        Self::with_name(class.name(), class)
    }

    pub fn with_name(name: impl Into<String>, class: PlayerClass) -> Self {
        Self {
            combatant: Combatant::new(name, class.kind(), class.base_stats()),
            class,
            xp: 0,
            level: 1,
            upgrade_points: 0,
            growth: LevelGrowth::default(),
            level_up_heal: LevelUpHeal::default(),
        }
    }

    pub fn with_progression(mut self, growth: LevelGrowth, level_up_heal: LevelUpHeal) -> Self {
        self.growth = growth;
        self.level_up_heal = level_up_heal;
        self
    }

    pub fn name(&self) -> &str {
        &self.combatant.name
    }

    pub fn is_alive(&self) -> bool {
        self.combatant.is_alive()
    }

    /// Adds XP and applies every level it completes.
    pub fn gain_xp(&mut self, amount: u32) -> LevelUpReport {
        let mut report = LevelUpReport {
            xp_gained: amount,
            new_level: self.level,
            ..Default::default()
        };
        self.xp += amount;
        while self.xp >= XP_PER_LEVEL {
            self.xp -= XP_PER_LEVEL;
            self.level_up();
            report.levels_gained += 1;
            report.points_gained += LEVEL_UP_UPGRADE_POINTS;
        }
        report.new_level = self.level;
        if report.leveled_up() {
            tracing::debug!(
                member = %self.combatant.name,
                level = self.level,
                "level up"
            );
        }
        report
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.upgrade_points += LEVEL_UP_UPGRADE_POINTS;

        let growth = self.growth;
        let c = &mut self.combatant;
        c.max_hp += growth.max_hp;
        c.base_max_mp += growth.max_mp;
        c.base_attack += growth.attack;
        c.base_defense += growth.defense;
        c.base_evasion = (c.base_evasion + growth.evasion).min(MAX_EVASION);

        match self.level_up_heal {
            LevelUpHeal::Fixed { hp, mp } => {
                c.heal(hp);
                if c.is_alive() {
                    c.restore_mp(mp);
                }
            }
            LevelUpHeal::Full => c.restore_full(),
        }
    }

    /// Spends one upgrade point on `stat`.
    pub fn upgrade_stat(&mut self, stat: UpgradeStat) -> Result<(), ActionError> {
        if self.upgrade_points == 0 {
            return Err(ActionError::NoUpgradePoints);
        }
        let amount = stat.increment();
        let c = &mut self.combatant;
        match stat {
            UpgradeStat::Attack => c.base_attack += amount,
            UpgradeStat::Defense => c.base_defense += amount,
            UpgradeStat::Evasion => c.base_evasion = (c.base_evasion + amount).min(MAX_EVASION),
            UpgradeStat::Mp => {
                c.base_max_mp += amount;
                c.restore_mp(amount);
            }
            UpgradeStat::Hp => {
                c.max_hp += amount;
                c.heal(amount);
            }
        }
        self.upgrade_points -= 1;
        Ok(())
    }

    /// Parses `name` and spends a point on it. Point availability is checked
    /// before the name.
    pub fn upgrade_stat_named(&mut self, name: &str) -> Result<UpgradeStat, ActionError> {
        if self.upgrade_points == 0 {
            return Err(ActionError::NoUpgradePoints);
        }
        let stat = name.parse::<UpgradeStat>().map_err(ActionError::InvalidStat)?;
        self.upgrade_stat(stat)?;
        Ok(stat)
    }
}
