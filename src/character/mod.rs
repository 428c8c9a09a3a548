//! The persisted character record and its upgradeable attributes.

pub mod stats;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::GameError;
use self::stats::{derive_stats, DerivedStats};

/// The two base attributes a player can spend gold on. A closed set:
/// request payloads deserialize straight into this enum, so a
/// user-supplied stat name never reaches the persistence layer as a
/// string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeStat {
    Strength,
    Dexterity,
}

impl UpgradeStat {
    pub fn parse(name: &str) -> Result<Self, GameError> {
        match name {
            "strength" => Ok(UpgradeStat::Strength),
            "dexterity" => Ok(UpgradeStat::Dexterity),
            other => Err(GameError::InvalidStat(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeStat::Strength => "strength",
            UpgradeStat::Dexterity => "dexterity",
        }
    }
}

/// A character row as persisted by the caller.
///
/// Derived stats are stored alongside the base attributes (the client
/// renders them directly, as the original row schema did), but they are
/// always a pure function of strength and dexterity —
/// [`Character::reconcile_derived`] repairs any divergence found at read
/// time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Opaque account id from the auth layer; owned by exactly one account.
    pub user_id: String,
    pub strength: i64,
    pub dexterity: i64,
    pub gold: u64,
    pub current_stage: u32,
    pub stage_progress: u32,
    #[serde(flatten)]
    pub derived: DerivedStats,
    /// Unix seconds.
    pub created_at: i64,
    /// Unix seconds, bumped by the store on every save.
    pub updated_at: i64,
}

impl Character {
    /// Creates a character with first-login defaults.
    pub fn new(user_id: impl Into<String>, now: i64) -> Self {
        let derived = derive_stats(STARTING_ATTRIBUTE_LEVEL, STARTING_ATTRIBUTE_LEVEL)
            .expect("starting attributes are valid");
        Self {
            user_id: user_id.into(),
            strength: STARTING_ATTRIBUTE_LEVEL,
            dexterity: STARTING_ATTRIBUTE_LEVEL,
            gold: STARTING_GOLD,
            current_stage: STARTING_STAGE,
            stage_progress: 0,
            derived,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn stat_level(&self, stat: UpgradeStat) -> i64 {
        match stat {
            UpgradeStat::Strength => self.strength,
            UpgradeStat::Dexterity => self.dexterity,
        }
    }

    pub fn increment_stat(&mut self, stat: UpgradeStat) {
        match stat {
            UpgradeStat::Strength => self.strength += 1,
            UpgradeStat::Dexterity => self.dexterity += 1,
        }
    }

    /// Recomputes derived stats from the base attributes and overwrites
    /// the stored values.
    pub fn refresh_derived(&mut self) -> Result<(), GameError> {
        self.derived = derive_stats(self.strength, self.dexterity)?;
        Ok(())
    }

    /// Repairs derived-stat drift. Returns true if the stored values
    /// diverged from the recomputed ones.
    pub fn reconcile_derived(&mut self) -> Result<bool, GameError> {
        let expected = derive_stats(self.strength, self.dexterity)?;
        if self.derived != expected {
            self.derived = expected;
            return Ok(true);
        }
        Ok(false)
    }
}
