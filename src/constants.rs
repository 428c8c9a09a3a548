//! Game tuning values.
//!
//! Every formula coefficient lives here so balance changes never require
//! touching the logic modules.

// Stat model
pub const ATTACK_PER_STRENGTH: i64 = 5;
pub const BASE_MAX_HP: i64 = 50;
pub const HP_PER_STRENGTH: i64 = 10;
pub const BASE_CRIT_RATE: f64 = 0.05;
pub const CRIT_RATE_PER_DEXTERITY: f64 = 0.005;
pub const EVASION_PER_DEXTERITY: f64 = 0.002;
pub const BASE_CRIT_DAMAGE: f64 = 1.5;
pub const BASE_ATTACK_SPEED: f64 = 1.0;

/// Probability stats are clamped to [0, CHANCE_CAP]; a rate of exactly 1.0
/// is never reachable.
pub const CHANCE_CAP: f64 = 1.0 - f64::EPSILON;

// Upgrade economy: cost = floor(10 * 1.15^(level - 1))
pub const UPGRADE_BASE_COST: f64 = 10.0;
pub const UPGRADE_COST_GROWTH: f64 = 1.15;

// Stage progression
pub const STAGES_PER_GROUP: u32 = 5;
pub const ELITE_KILL_INTERVAL: u32 = 5;
pub const STAGE_SCALING_FACTOR: f64 = 1.25;

// Grade multipliers applied on top of stage scaling
pub const ELITE_STAT_MULTIPLIER: f64 = 3.0;
pub const BOSS_STAT_MULTIPLIER: f64 = 10.0;

// Defeat penalty: keep 90% of gold, fall back one stage
pub const DEFEAT_GOLD_RETENTION: f64 = 0.9;

// New character defaults
pub const STARTING_ATTRIBUTE_LEVEL: i64 = 1;
pub const STARTING_GOLD: u64 = 10;
pub const STARTING_STAGE: u32 = 1;
