//! Derived-stat calculation and upgrade costs.
//!
//! Derived stats are always a pure function of strength and dexterity;
//! they are persisted for the client's benefit but never mutated
//! independently of their inputs.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::GameError;

/// Combat stats computed from the two base attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedStats {
    pub max_hp: i64,
    pub attack_power: i64,
    pub crit_rate: f64,
    pub crit_damage: f64,
    pub attack_speed: f64,
    pub evasion_rate: f64,
    pub dps: f64,
}

/// Calculates derived stats from the base attributes.
///
/// Deterministic and total for non-negative inputs; rejects negative
/// attributes rather than producing nonsense stats.
pub fn derive_stats(strength: i64, dexterity: i64) -> Result<DerivedStats, GameError> {
    if strength < 0 {
        return Err(GameError::InvalidAttribute {
            name: "strength",
            value: strength,
        });
    }
    if dexterity < 0 {
        return Err(GameError::InvalidAttribute {
            name: "dexterity",
            value: dexterity,
        });
    }

    let attack_power = strength * ATTACK_PER_STRENGTH;
    let max_hp = BASE_MAX_HP + strength * HP_PER_STRENGTH;
    let crit_rate =
        (BASE_CRIT_RATE + dexterity as f64 * CRIT_RATE_PER_DEXTERITY).clamp(0.0, CHANCE_CAP);
    let evasion_rate = (dexterity as f64 * EVASION_PER_DEXTERITY).clamp(0.0, CHANCE_CAP);

    // Expected damage throughput, crit folded in as an average
    let dps = attack_power as f64 * BASE_ATTACK_SPEED * (1.0 + crit_rate * BASE_CRIT_DAMAGE);

    Ok(DerivedStats {
        max_hp,
        attack_power,
        crit_rate,
        crit_damage: BASE_CRIT_DAMAGE,
        attack_speed: BASE_ATTACK_SPEED,
        evasion_rate,
        dps,
    })
}

/// Gold cost to raise an attribute from `level` to `level + 1`:
/// `floor(10 * 1.15^(level - 1))`. Strictly increasing in `level`.
pub fn upgrade_cost(level: i64) -> Result<u64, GameError> {
    if level < 1 {
        return Err(GameError::InvalidLevel(level));
    }
    // saturate the exponent: an absurd level yields an unpayable cost,
    // never a wrapped-around cheap one
    let exponent = i32::try_from(level - 1).unwrap_or(i32::MAX);
    let cost = UPGRADE_BASE_COST * UPGRADE_COST_GROWTH.powi(exponent);
    Ok(cost.floor() as u64)
}
