//! Monster templates and stage-driven encounter generation.

pub mod generation;
pub mod templates;

pub use self::generation::{kills_required, monster_for_stage, Encounter, Grade};
