//! Grindstone — server-authoritative progression and combat engine for a
//! browser idle RPG.
//!
//! The crate is the pure core behind session-gated HTTP handlers: given a
//! persisted character row it derives combat stats, materializes the
//! deterministic encounter for the character's stage and kill progress,
//! resolves repeated combat ticks, and applies victory/defeat/upgrade
//! state transitions. Authentication, SQL drivers, routing, and rendering
//! live in the surrounding service; the core's only I/O seam is the
//! [`store::CharacterStore`] trait.

pub mod character;
pub mod combat;
pub mod constants;
pub mod error;
pub mod monsters;
pub mod progression;
pub mod session;
pub mod store;

pub use character::stats::{derive_stats, upgrade_cost, DerivedStats};
pub use character::{Character, UpgradeStat};
pub use combat::{update_combat, CombatEvent, CombatState, CombatStatus, TickOutcome};
pub use error::GameError;
pub use monsters::{kills_required, monster_for_stage, Encounter, Grade};
pub use progression::{
    resolve_defeat, resolve_victory, upgrade, DefeatOutcome, UpgradeOutcome, VictoryOutcome,
};
pub use session::{BattleSession, TickEvent};
pub use store::{CharacterStore, MemoryStore};
