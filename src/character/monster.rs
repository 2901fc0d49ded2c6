use super::combatant::{BaseStats, Combatant};
use super::kinds::CombatantKind;
use crate::core::constants::*;
use crate::items::LootTable;
use serde::{Deserialize, Serialize};

const MONSTER_THEMES: [&str; 6] = ["Slime", "Goblin", "Wolf", "Orc", "Wraith", "Drake"];

/// Name theme for regular monsters; changes every boss interval.
pub fn monster_theme(stage: u32) -> &'static str {
    let band = (stage.saturating_sub(1) / BOSS_STAGE_INTERVAL) as usize;
    MONSTER_THEMES[band.min(MONSTER_THEMES.len() - 1)]
}

pub fn regular_stats(stage: u32) -> BaseStats {
    let s = stage as i32;
    BaseStats {
        max_hp: MONSTER_BASE_HP + MONSTER_HP_PER_STAGE * s,
        max_mp: MONSTER_BASE_MP + MONSTER_MP_PER_STAGE * s,
        attack: MONSTER_BASE_ATTACK + MONSTER_ATTACK_PER_STAGE * s,
        defense: MONSTER_BASE_DEFENSE + MONSTER_DEFENSE_PER_STAGE * s,
        evasion: (MONSTER_BASE_EVASION + MONSTER_EVASION_PER_STAGE * s).min(MONSTER_EVASION_CAP),
    }
}

pub fn boss_stats(tier: u32) -> BaseStats {
    let t = tier as i32;
    BaseStats {
        max_hp: BOSS_BASE_HP + BOSS_HP_PER_TIER * t,
        max_mp: BOSS_BASE_MP + BOSS_MP_PER_TIER * t,
        attack: BOSS_BASE_ATTACK + BOSS_ATTACK_PER_TIER * t,
        defense: BOSS_BASE_DEFENSE + BOSS_DEFENSE_PER_TIER * t,
        evasion: (BOSS_BASE_EVASION + BOSS_EVASION_PER_TIER * t).min(BOSS_EVASION_CAP),
    }
}

/// An enemy combatant. Monsters never level; their stats come from the stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub combatant: Combatant,
    /// Stage number for regular monsters, boss tier for bosses.
    pub tier: u32,
}

impl Monster {
    /// The `number`-th (1-based) regular monster of `stage`.
    pub fn regular(stage: u32, number: usize) -> Self {
        let name = format!("{} #{}", monster_theme(stage), number);
        Self {
            combatant: Combatant::new(name, CombatantKind::Monster, regular_stats(stage)),
            tier: stage,
        }
    }

    pub fn boss(tier: u32) -> Self {
        let name = format!("Stage Boss {}", tier);
        Self {
            combatant: Combatant::new(name, CombatantKind::Boss, boss_stats(tier)),
            tier,
        }
    }

    pub fn name(&self) -> &str {
        &self.combatant.name
    }

    pub fn is_alive(&self) -> bool {
        self.combatant.is_alive()
    }

    pub fn is_boss(&self) -> bool {
        self.combatant.kind == CombatantKind::Boss
    }

    pub fn loot_table(&self) -> LootTable {
        self.combatant.profile().loot.unwrap_or(LootTable::Monster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_stats_stage_one() {
        let s = regular_stats(1);
        assert_eq!(s.max_hp, 60);
        assert_eq!(s.max_mp, 35);
        assert_eq!(s.attack, 20);
        assert_eq!(s.defense, 11);
        assert_eq!(s.evasion, 12);
    }

    #[test]
    fn test_regular_evasion_capped() {
        assert_eq!(regular_stats(100).evasion, 50);
    }

    #[test]
    fn test_boss_stats_tier_one() {
        let s = boss_stats(1);
        assert_eq!(s.max_hp, 150);
        assert_eq!(s.max_mp, 95);
        assert_eq!(s.attack, 45);
        assert_eq!(s.defense, 30);
        assert_eq!(s.evasion, 35);
        assert_eq!(boss_stats(50).evasion, 70);
    }

    #[test]
    fn test_stats_monotonic_in_stage() {
        for stage in 1..30 {
            let a = regular_stats(stage);
            let b = regular_stats(stage + 1);
            assert!(b.max_hp > a.max_hp);
            assert!(b.attack > a.attack);
            assert!(b.defense > a.defense);
            assert!(b.evasion >= a.evasion);
        }
    }

    #[test]
    fn test_names_and_tables() {
        let m = Monster::regular(1, 2);
        assert_eq!(m.name(), "Slime #2");
        assert_eq!(m.loot_table(), LootTable::Monster);
        assert!(!m.is_boss());
        assert_eq!(Monster::regular(4, 1).name(), "Goblin #1");
        let b = Monster::boss(2);
        assert_eq!(b.name(), "Stage Boss 2");
        assert!(b.is_boss());
        assert_eq!(b.loot_table(), LootTable::Boss);
    }
}
