//! The combat tick resolver.
//!
//! Pure simulation: the caller supplies the elapsed tick duration (a
//! fixed-interval timer, a batched catch-up, or a server cron all look the
//! same from here) and the resolver mutates the combat state and
//! encounter, reporting whether the encounter ended this tick. Nothing is
//! persisted; the controller acts on the returned status.

use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::monsters::Encounter;

/// Outcome of the active encounter after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatStatus {
    Active,
    Won,
    Lost,
}

/// Per-encounter combat state owned by the session loop: the player's
/// current hp and the monster's fractional attack gauge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatState {
    pub player_current_hp: f64,
    pub player_max_hp: f64,
    /// Accumulates `attack_speed * tick_seconds`; every whole unit
    /// delivers one monster hit, so speeds above 1.0 can land several
    /// hits in a single tick.
    pub attack_gauge: f64,
}

impl CombatState {
    pub fn new(player_max_hp: i64) -> Self {
        let max = player_max_hp.max(0) as f64;
        Self {
            player_current_hp: max,
            player_max_hp: max,
            attack_gauge: 0.0,
        }
    }

    pub fn is_player_alive(&self) -> bool {
        self.player_current_hp > 0.0
    }

    /// Clears the attack gauge for a fresh encounter; hp carries over.
    pub fn reset_gauge(&mut self) {
        self.attack_gauge = 0.0;
    }

    pub fn heal_full(&mut self) {
        self.player_current_hp = self.player_max_hp;
        self.attack_gauge = 0.0;
    }

    /// Applies a new max hp (after an upgrade) without healing; current hp
    /// is capped if the max shrank.
    pub fn update_max_hp(&mut self, new_max_hp: i64) {
        self.player_max_hp = new_max_hp.max(0) as f64;
        if self.player_current_hp > self.player_max_hp {
            self.player_current_hp = self.player_max_hp;
        }
    }
}

/// A single exchange within a tick, for the caller's combat log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    PlayerHit { damage: f64 },
    MonsterHit { damage: u64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub status: CombatStatus,
    pub events: Vec<CombatEvent>,
}

/// Advances combat by one tick of `tick_seconds`.
///
/// Order within a tick: the player's dps lands first, then the monster's
/// attack gauge accumulates and delivers hits — so a simultaneous kill
/// favors the player. Out-of-range numeric input is clamped, never an
/// error.
pub fn update_combat(
    character: &Character,
    state: &mut CombatState,
    encounter: &mut Encounter,
    tick_seconds: f64,
) -> TickOutcome {
    let mut events = Vec::new();

    let tick_seconds = if tick_seconds.is_finite() {
        tick_seconds.max(0.0)
    } else {
        0.0
    };
    if encounter.current_hp < 0.0 {
        encounter.current_hp = 0.0;
    }
    if state.player_current_hp < 0.0 {
        state.player_current_hp = 0.0;
    }

    let damage = character.derived.dps * tick_seconds;
    if damage > 0.0 {
        encounter.take_damage(damage);
        events.push(CombatEvent::PlayerHit { damage });
    }
    if !encounter.is_alive() {
        return TickOutcome {
            status: CombatStatus::Won,
            events,
        };
    }

    state.attack_gauge += encounter.attack_speed * tick_seconds;
    while state.attack_gauge >= 1.0 {
        state.attack_gauge -= 1.0;
        state.player_current_hp =
            (state.player_current_hp - encounter.attack_power as f64).max(0.0);
        events.push(CombatEvent::MonsterHit {
            damage: encounter.attack_power,
        });
        if !state.is_player_alive() {
            return TickOutcome {
                status: CombatStatus::Lost,
                events,
            };
        }
    }

    TickOutcome {
        status: CombatStatus::Active,
        events,
    }
}
