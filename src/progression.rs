//! Progression state transitions: victory, defeat, and stat upgrades.
//!
//! Each operation is one logical read-modify-write against the character
//! row. The caller owns the transactional boundary — two operations for
//! the same character must never interleave (see `store::CharacterStore`).

use serde::Serialize;

use crate::character::{stats, Character, UpgradeStat};
use crate::constants::DEFEAT_GOLD_RETENTION;
use crate::error::GameError;
use crate::monsters::{monster_for_stage, Encounter, Grade};

/// Result of resolving a kill: updated reward bookkeeping plus the next
/// encounter, ready to persist and serialize back to the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VictoryOutcome {
    pub gold_earned: u64,
    pub stage_cleared: bool,
    pub next_encounter: Encounter,
}

/// Result of a player death: the rolled-back stage and the gold penalty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefeatOutcome {
    pub gold_lost: u64,
    pub next_encounter: Encounter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpgradeOutcome {
    pub stat: UpgradeStat,
    pub cost: u64,
    pub new_level: i64,
}

/// Applies a victory over the character's current encounter.
///
/// The defeated monster is regenerated deterministically from the
/// persisted (stage, progress) pair, so the reward cannot be forged by a
/// client. A boss kill advances the stage and resets progress; a regular
/// kill increments progress.
pub fn resolve_victory(character: &mut Character) -> Result<VictoryOutcome, GameError> {
    let defeated = monster_for_stage(character.current_stage, character.stage_progress)?;

    let gold_earned = defeated.gold_reward;
    character.gold = character.gold.saturating_add(gold_earned);

    let stage_cleared = defeated.grade == Grade::Boss;
    if stage_cleared {
        character.current_stage += 1;
        character.stage_progress = 0;
    } else {
        character.stage_progress += 1;
    }

    let next_encounter = monster_for_stage(character.current_stage, character.stage_progress)?;
    Ok(VictoryOutcome {
        gold_earned,
        stage_cleared,
        next_encounter,
    })
}

/// Applies the defeat penalty: fall back one stage (never below 1), reset
/// progress, and forfeit 10% of gold.
pub fn resolve_defeat(character: &mut Character) -> Result<DefeatOutcome, GameError> {
    let gold_before = character.gold;

    character.current_stage = character.current_stage.saturating_sub(1).max(1);
    character.stage_progress = 0;
    character.gold = (character.gold as f64 * DEFEAT_GOLD_RETENTION).floor() as u64;

    let next_encounter = monster_for_stage(character.current_stage, character.stage_progress)?;
    Ok(DefeatOutcome {
        gold_lost: gold_before - character.gold,
        next_encounter,
    })
}

/// Spends gold to raise a base attribute by one level, then recomputes
/// every derived stat. An `InsufficientGold` rejection leaves the
/// character untouched.
pub fn upgrade(character: &mut Character, stat: UpgradeStat) -> Result<UpgradeOutcome, GameError> {
    let level = character.stat_level(stat);
    let cost = stats::upgrade_cost(level)?;

    if character.gold < cost {
        return Err(GameError::InsufficientGold {
            cost,
            gold: character.gold,
        });
    }

    character.gold -= cost;
    character.increment_stat(stat);
    character.refresh_derived()?;

    Ok(UpgradeOutcome {
        stat,
        cost,
        new_level: character.stat_level(stat),
    })
}
