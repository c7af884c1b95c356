//! Persistence gateway.
//!
//! Mirrors whole collections into a [`KeyValueStore`] as JSON arrays. Neither
//! loading nor saving ever fails from the caller's point of view: unreadable
//! data falls back to the supplied default and failed writes are logged.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error};

use super::key_value::{KeyValueStore, StorageError};

/// Serializes collections to, and restores them from, a key-value medium.
pub struct PersistenceGateway {
    backend: Box<dyn KeyValueStore>,
}

impl PersistenceGateway {
    pub fn new(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Load the collection stored under `key`, or `default` when nothing usable is stored.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: Vec<T>) -> Vec<T> {
        match self.try_load(key) {
            Ok(Some(items)) => {
                debug!(key, count = items.len(), "Loaded persisted collection");
                items
            }
            Ok(None) => {
                debug!(key, "Nothing persisted, using default");
                default
            }
            Err(e) => {
                error!(key, error = %e, "Failed to load persisted collection, using default");
                default
            }
        }
    }

    /// Persist the collection under `key`. Failures are logged and swallowed.
    pub fn save<T: Serialize>(&mut self, key: &str, items: &[T]) {
        if let Err(e) = self.try_save(key, items) {
            error!(key, error = %e, "Failed to persist collection");
        }
    }

    fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<Vec<T>>, StorageError> {
        match self.backend.get(key)? {
            Some(raw) if !raw.trim().is_empty() => Ok(Some(serde_json::from_str(&raw)?)),
            _ => Ok(None),
        }
    }

    fn try_save<T: Serialize>(&mut self, key: &str, items: &[T]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(items)?;
        self.backend.set(key, &raw)
    }
}
