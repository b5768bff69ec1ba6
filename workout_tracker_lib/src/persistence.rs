use std::collections::HashMap;

use tracing::{debug, warn};

use crate::{store::WorkoutStore, workout::Workout, TrackerError};

/// Flat string key-value storage, e.g. the browser's `localStorage`.
pub trait KeyValueStorage {
    fn load(&self, key: &str) -> Result<Option<String>, TrackerError>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), TrackerError>;
}

/// Storage kept in memory. Used natively and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut storage = Self::default();
        storage.entries.insert(key.to_owned(), value.to_owned());
        storage
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, TrackerError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), TrackerError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Reads and writes whole-store snapshots as a JSON array under one key.
#[derive(Debug)]
pub struct WorkoutPersistence<S: KeyValueStorage> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> WorkoutPersistence<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self { storage, key: key.into() }
    }

    pub fn save(&mut self, store: &WorkoutStore) -> Result<(), TrackerError> {
        let json = serde_json::to_string(store.as_slice())?;
        self.storage.save(&self.key, &json)?;
        debug!("Saved {} workouts under '{}'", store.len(), self.key);
        Ok(())
    }

    /// Missing data is an empty list. Derived fields are taken as stored.
    pub fn load(&self) -> Result<Vec<Workout>, TrackerError> {
        let Some(json) = self.storage.load(&self.key)? else {
            debug!("No workouts stored under '{}'", self.key);
            return Ok(Vec::new());
        };

        let workouts: Option<Vec<Workout>> = serde_json::from_str(&json)?;
        Ok(workouts.unwrap_or_default())
    }

    /// Like `load`, but unreadable data is logged and treated as empty.
    pub fn load_or_empty(&self) -> Vec<Workout> {
        match self.load() {
            Ok(workouts) => workouts,
            Err(err) => {
                warn!("Ignoring stored workouts: {err}");
                Vec::new()
            }
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
