//! Tick-based combat resolution.

pub mod resolver;

pub use self::resolver::{update_combat, CombatEvent, CombatState, CombatStatus, TickOutcome};
