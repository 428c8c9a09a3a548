//! The battle session: an explicit state object driving the combat loop.
//!
//! Owns the character, the per-encounter combat state, and the active
//! encounter, and exposes a single `tick()` the scheduling primitive of
//! choice calls with the elapsed duration. Tick events describe what
//! happened so the caller can build log lines and response payloads; the
//! session never touches presentation concerns.

use serde::Serialize;

use crate::character::{Character, UpgradeStat};
use crate::combat::{update_combat, CombatEvent, CombatState, CombatStatus};
use crate::error::GameError;
use crate::monsters::{monster_for_stage, Encounter, Grade};
use crate::progression::{self, UpgradeOutcome};

/// What a single tick produced, in order of occurrence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TickEvent {
    PlayerHit {
        damage: f64,
    },
    MonsterHit {
        damage: u64,
    },
    MonsterDefeated {
        name: String,
        gold_earned: u64,
    },
    StageCleared {
        new_stage: u32,
    },
    /// Player death: stage rolled back, 10% of gold forfeited, hp restored.
    PlayerDefeated {
        gold_lost: u64,
        new_stage: u32,
    },
    MonsterSpawned {
        name: String,
        grade: Grade,
    },
}

/// One character's combat loop state. Owned by the session; never shared
/// across characters.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleSession {
    character: Character,
    combat: CombatState,
    encounter: Encounter,
}

impl BattleSession {
    /// Starts a session from a loaded character row. Derived stats are
    /// reconciled first so a corrupt row cannot feed combat.
    pub fn new(mut character: Character) -> Result<Self, GameError> {
        character.reconcile_derived()?;
        let encounter = monster_for_stage(character.current_stage, character.stage_progress)?;
        let combat = CombatState::new(character.derived.max_hp);
        Ok(Self {
            character,
            combat,
            encounter,
        })
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn combat(&self) -> &CombatState {
        &self.combat
    }

    pub fn encounter(&self) -> &Encounter {
        &self.encounter
    }

    /// Consumes the session, yielding the character for persistence.
    pub fn into_character(self) -> Character {
        self.character
    }

    /// Advances the loop by one tick. On a terminal combat status the
    /// victory/defeat transition is applied and the next encounter
    /// spawned, so the session is always ready for the next tick.
    pub fn tick(&mut self, tick_seconds: f64) -> Result<Vec<TickEvent>, GameError> {
        let outcome = update_combat(
            &self.character,
            &mut self.combat,
            &mut self.encounter,
            tick_seconds,
        );

        let mut events: Vec<TickEvent> = outcome
            .events
            .into_iter()
            .map(|event| match event {
                CombatEvent::PlayerHit { damage } => TickEvent::PlayerHit { damage },
                CombatEvent::MonsterHit { damage } => TickEvent::MonsterHit { damage },
            })
            .collect();

        match outcome.status {
            CombatStatus::Active => {}
            CombatStatus::Won => {
                let defeated_name = self.encounter.name.clone();
                let victory = progression::resolve_victory(&mut self.character)?;
                events.push(TickEvent::MonsterDefeated {
                    name: defeated_name,
                    gold_earned: victory.gold_earned,
                });
                if victory.stage_cleared {
                    events.push(TickEvent::StageCleared {
                        new_stage: self.character.current_stage,
                    });
                }
                self.spawn(victory.next_encounter, &mut events);
                self.combat.reset_gauge();
            }
            CombatStatus::Lost => {
                let defeat = progression::resolve_defeat(&mut self.character)?;
                events.push(TickEvent::PlayerDefeated {
                    gold_lost: defeat.gold_lost,
                    new_stage: self.character.current_stage,
                });
                self.spawn(defeat.next_encounter, &mut events);
                self.combat.heal_full();
            }
        }

        Ok(events)
    }

    /// Upgrades a stat mid-session and propagates the new max hp into the
    /// combat state without healing.
    pub fn upgrade(&mut self, stat: UpgradeStat) -> Result<UpgradeOutcome, GameError> {
        let outcome = progression::upgrade(&mut self.character, stat)?;
        self.combat.update_max_hp(self.character.derived.max_hp);
        Ok(outcome)
    }

    fn spawn(&mut self, encounter: Encounter, events: &mut Vec<TickEvent>) {
        events.push(TickEvent::MonsterSpawned {
            name: encounter.name.clone(),
            grade: encounter.grade,
        });
        self.encounter = encounter;
    }
}
