//! Error taxonomy for the game core.
//!
//! Validation errors (`InvalidAttribute`, `InvalidStage`, `InvalidLevel`,
//! `InvalidStat`) are caller errors the HTTP layer maps to 400-class
//! responses. `InsufficientGold` is an expected business rejection, not a
//! bug. Template-table anomalies are recovered internally with a safe
//! fallback and never surface here.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum GameError {
    #[error("invalid attribute value: {name} = {value}")]
    InvalidAttribute { name: &'static str, value: i64 },

    #[error("invalid stage: {0}")]
    InvalidStage(u32),

    #[error("invalid upgrade level: {0}")]
    InvalidLevel(i64),

    #[error("unknown upgrade stat: {0:?}")]
    InvalidStat(String),

    #[error("not enough gold: cost is {cost}, have {gold}")]
    InsufficientGold { cost: u64, gold: u64 },

    #[error("character not found: {0}")]
    CharacterNotFound(String),
}
