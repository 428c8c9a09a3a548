//! Character persistence seam.
//!
//! The core never opens a database connection; surrounding code provides
//! storage through [`CharacterStore`]. [`MemoryStore`] is the in-process
//! implementation used by tests and single-node deployments — its
//! `update` holds the row lock across the whole read-modify-write, which
//! is the serialization guarantee every progression operation assumes.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use tracing::warn;

use crate::character::Character;
use crate::error::GameError;

pub trait CharacterStore {
    /// Loads a character row. Derived stats are reconciled before the
    /// record is handed out, so callers never see drifted values.
    fn load(&self, user_id: &str) -> Result<Character, GameError>;

    /// Persists a character row, bumping its `updated_at` stamp.
    fn save(&self, character: &Character) -> Result<(), GameError>;

    /// Loads the row, creating it with first-login defaults if absent.
    fn load_or_create(&self, user_id: &str) -> Result<Character, GameError>;

    /// Runs one logical operation against the row as an atomic
    /// read-modify-write. The default implementation is load + mutate +
    /// save; implementations with real locking should override it.
    fn update<T, F>(&self, user_id: &str, op: F) -> Result<T, GameError>
    where
        F: FnOnce(&mut Character) -> Result<T, GameError>,
        Self: Sized,
    {
        let mut character = self.load(user_id)?;
        let value = op(&mut character)?;
        self.save(&character)?;
        Ok(value)
    }
}

/// In-memory store keyed by account id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<HashMap<String, Character>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn reconcile(character: &mut Character) -> Result<(), GameError> {
        if character.reconcile_derived()? {
            warn!(user_id = %character.user_id, "derived stats drifted from base attributes, recomputed");
        }
        Ok(())
    }
}

impl CharacterStore for MemoryStore {
    fn load(&self, user_id: &str) -> Result<Character, GameError> {
        let mut rows = self.rows.lock().unwrap();
        let character = rows
            .get_mut(user_id)
            .ok_or_else(|| GameError::CharacterNotFound(user_id.to_string()))?;
        Self::reconcile(character)?;
        Ok(character.clone())
    }

    fn save(&self, character: &Character) -> Result<(), GameError> {
        let mut row = character.clone();
        row.updated_at = Utc::now().timestamp();
        self.rows
            .lock()
            .unwrap()
            .insert(row.user_id.clone(), row);
        Ok(())
    }

    fn load_or_create(&self, user_id: &str) -> Result<Character, GameError> {
        let mut rows = self.rows.lock().unwrap();
        let character = rows
            .entry(user_id.to_string())
            .or_insert_with(|| Character::new(user_id, Utc::now().timestamp()));
        Self::reconcile(character)?;
        Ok(character.clone())
    }

    fn update<T, F>(&self, user_id: &str, op: F) -> Result<T, GameError>
    where
        F: FnOnce(&mut Character) -> Result<T, GameError>,
    {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .get_mut(user_id)
            .ok_or_else(|| GameError::CharacterNotFound(user_id.to_string()))?;
        Self::reconcile(row)?;
        // mutate a copy so a rejected operation cannot leave a partial
        // write behind; the row is replaced only on success
        let mut character = row.clone();
        let value = op(&mut character)?;
        character.updated_at = Utc::now().timestamp();
        *row = character;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::UpgradeStat;
    use crate::progression;

    #[test]
    fn test_load_missing_character() {
        let store = MemoryStore::new();
        assert_eq!(
            store.load("nobody"),
            Err(GameError::CharacterNotFound("nobody".to_string()))
        );
    }

    #[test]
    fn test_first_login_creates_defaults() {
        let store = MemoryStore::new();
        let character = store.load_or_create("google-oauth2|42").unwrap();
        assert_eq!(character.strength, 1);
        assert_eq!(character.gold, 10);
        assert_eq!(character.current_stage, 1);
        assert_eq!(store.len(), 1);

        // second login returns the same row, not a fresh one
        store
            .update("google-oauth2|42", |c| {
                c.gold = 999;
                Ok(())
            })
            .unwrap();
        let again = store.load_or_create("google-oauth2|42").unwrap();
        assert_eq!(again.gold, 999);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let store = MemoryStore::new();
        let mut character = Character::new("user-1", 0);
        character.gold = 1234;
        store.save(&character).unwrap();

        let loaded = store.load("user-1").unwrap();
        assert_eq!(loaded.gold, 1234);
        assert!(loaded.updated_at >= character.created_at);
    }

    #[test]
    fn test_load_repairs_drifted_derived_stats() {
        let store = MemoryStore::new();
        let mut character = Character::new("user-1", 0);
        character.derived.attack_power = 9_999;
        store.save(&character).unwrap();

        let loaded = store.load("user-1").unwrap();
        assert_eq!(loaded.derived.attack_power, 5);
    }

    #[test]
    fn test_update_applies_progression_atomically() {
        let store = MemoryStore::new();
        store.load_or_create("user-1").unwrap();

        let outcome = store
            .update("user-1", |character| {
                progression::upgrade(character, UpgradeStat::Strength)
            })
            .unwrap();
        assert_eq!(outcome.cost, 10);

        let loaded = store.load("user-1").unwrap();
        assert_eq!(loaded.strength, 2);
        assert_eq!(loaded.gold, 0);
    }

    #[test]
    fn test_rejected_update_changes_nothing() {
        let store = MemoryStore::new();
        store.load_or_create("user-1").unwrap();

        // gold 10 < cost 10 only after the first upgrade drains it
        store
            .update("user-1", |character| {
                progression::upgrade(character, UpgradeStat::Strength)
            })
            .unwrap();
        let err = store
            .update("user-1", |character| {
                progression::upgrade(character, UpgradeStat::Strength)
            })
            .unwrap_err();
        assert!(matches!(err, GameError::InsufficientGold { .. }));

        // the rejected operation changed nothing
        let loaded = store.load("user-1").unwrap();
        assert_eq!(loaded.strength, 2);
        assert_eq!(loaded.gold, 0);
    }

    #[test]
    fn test_failing_update_rolls_back_mutations() {
        let store = MemoryStore::new();
        store.load_or_create("user-1").unwrap();

        // the closure mutates the row before erroring out
        let err = store
            .update("user-1", |character| -> Result<(), GameError> {
                character.gold = 0;
                character.current_stage = 99;
                Err(GameError::InvalidStage(99))
            })
            .unwrap_err();
        assert_eq!(err, GameError::InvalidStage(99));

        let loaded = store.load("user-1").unwrap();
        assert_eq!(loaded.gold, 10);
        assert_eq!(loaded.current_stage, 1);
    }

    #[test]
    fn test_update_missing_character() {
        let store = MemoryStore::new();
        let err = store.update("ghost", |_| Ok(())).unwrap_err();
        assert_eq!(err, GameError::CharacterNotFound("ghost".to_string()));
    }
}
