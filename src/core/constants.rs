// Rolls
pub const EVASION_ROLL_MAX: i32 = 100;
pub const MAX_EVASION: i32 = 100;
pub const BASE_CRIT_CHANCE: f64 = 0.20;
pub const BASE_CRIT_MULTIPLIER: f64 = 2.0;
pub const CRIT_BONUS_DIVISOR: f64 = 100.0;
pub const MIN_DAMAGE: i32 = 1;

// Hero class
pub const HERO_MAX_HP: i32 = 100;
pub const HERO_MAX_MP: i32 = 50;
pub const HERO_ATTACK: i32 = 20;
pub const HERO_DEFENSE: i32 = 10;
pub const HERO_EVASION: i32 = 10;
pub const HERO_SPECIAL_MP_COST: i32 = 15;
pub const HERO_SPECIAL_MULTIPLIER: f64 = 2.0;

// Sage class
pub const SAGE_MAX_HP: i32 = 80;
pub const SAGE_MAX_MP: i32 = 100;
pub const SAGE_ATTACK: i32 = 15;
pub const SAGE_DEFENSE: i32 = 8;
pub const SAGE_EVASION: i32 = 12;
pub const SAGE_SPECIAL_MP_COST: i32 = 20;
pub const SAGE_SPECIAL_MULTIPLIER: f64 = 2.5;

// Kill reward granted to the member landing the killing blow
pub const KILL_REWARD_HP: i32 = 50;
pub const KILL_REWARD_MP: i32 = 30;
pub const KILL_REWARD_XP: u32 = 50;

// XP and leveling
pub const XP_PER_LEVEL: u32 = 100;
pub const LEVEL_UP_UPGRADE_POINTS: u32 = 3;
pub const LEVEL_UP_MAX_HP: i32 = 10;
pub const LEVEL_UP_MAX_MP: i32 = 10;
pub const LEVEL_UP_ATTACK: i32 = 5;
pub const LEVEL_UP_DEFENSE: i32 = 5;
pub const LEVEL_UP_EVASION: i32 = 5;
pub const LEVEL_UP_HEAL_HP: i32 = 10;
pub const LEVEL_UP_HEAL_MP: i32 = 10;

// Upgrade point increments
pub const UPGRADE_ATTACK: i32 = 5;
pub const UPGRADE_DEFENSE: i32 = 5;
pub const UPGRADE_EVASION: i32 = 5;
pub const UPGRADE_MP: i32 = 5;
pub const UPGRADE_HP: i32 = 10;

// Regular monster stats: base + per_stage * stage
pub const MONSTER_BASE_HP: i32 = 50;
pub const MONSTER_HP_PER_STAGE: i32 = 10;
pub const MONSTER_BASE_MP: i32 = 30;
pub const MONSTER_MP_PER_STAGE: i32 = 5;
pub const MONSTER_BASE_ATTACK: i32 = 15;
pub const MONSTER_ATTACK_PER_STAGE: i32 = 5;
pub const MONSTER_BASE_DEFENSE: i32 = 8;
pub const MONSTER_DEFENSE_PER_STAGE: i32 = 3;
pub const MONSTER_BASE_EVASION: i32 = 10;
pub const MONSTER_EVASION_PER_STAGE: i32 = 2;
pub const MONSTER_EVASION_CAP: i32 = 50;
pub const MONSTER_SPECIAL_CHANCE: f64 = 0.25;
pub const MONSTER_SPECIAL_MULTIPLIER: f64 = 1.5;

// Boss stats: base + per_tier * boss_tier
pub const BOSS_BASE_HP: i32 = 120;
pub const BOSS_HP_PER_TIER: i32 = 30;
pub const BOSS_BASE_MP: i32 = 80;
pub const BOSS_MP_PER_TIER: i32 = 15;
pub const BOSS_BASE_ATTACK: i32 = 30;
pub const BOSS_ATTACK_PER_TIER: i32 = 15;
pub const BOSS_BASE_DEFENSE: i32 = 20;
pub const BOSS_DEFENSE_PER_TIER: i32 = 10;
pub const BOSS_BASE_EVASION: i32 = 30;
pub const BOSS_EVASION_PER_TIER: i32 = 5;
pub const BOSS_EVASION_CAP: i32 = 70;
pub const BOSS_SPECIAL_CHANCE: f64 = 0.20;
pub const BOSS_SPECIAL_MP_COST: i32 = 20;
pub const BOSS_SPECIAL_MULTIPLIER: f64 = 3.0;

// Stage layout
pub const BOSS_STAGE_INTERVAL: u32 = 3;
pub const MAX_MONSTERS_PER_STAGE: usize = 2;

// Loot
pub const MONSTER_DROP_CHANCE: f64 = 0.5;
pub const BOSS_SECOND_DROP_CHANCE: f64 = 0.7;

// Victory rewards (multiplied by stage number)
pub const VICTORY_XP_PER_STAGE: u32 = 25;
pub const VICTORY_GOLD_PER_STAGE: u32 = 50;

// Party defaults
pub const STARTING_GOLD: u32 = 0;

// Revive restores max HP and max MP divided by this
pub const REVIVE_DIVISOR: i32 = 2;

// Defending halves incoming monster damage
pub const DEFEND_DAMAGE_DIVISOR: i32 = 2;

// Combat log
pub const COMBAT_LOG_CAPACITY: usize = 10;
