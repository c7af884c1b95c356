//! Key-value media for the persisted collections.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Failures of the durable medium. These are logged, never surfaced to callers
/// of the domain store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Opaque string key-value medium.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait KeyValueStore: Send {
    /// Read the value stored under `key`, `None` if nothing was stored
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Process-local medium, lost on exit.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One `<key>.json` file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// The directory is created on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;

        // Write then rename so a crash never leaves a half-written collection
        let target = self.path_for(key);
        let staging = self.dir.join(format!(".{}.json.tmp", key));
        fs::write(&staging, value)?;
        fs::rename(&staging, &target)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_get_set() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("sr_users").unwrap(), None);

        store.set("sr_users", "[]").unwrap();
        assert_eq!(store.get("sr_users").unwrap().as_deref(), Some("[]"));

        store.set("sr_users", "[1]").unwrap();
        assert_eq!(store.get("sr_users").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_file_store_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get("sr_stores").unwrap(), None);
    }

    #[test]
    fn test_file_store_creates_directory_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("nested");
        let mut store = FileStore::new(&data_dir);

        store.set("sr_ratings", r#"[{"id":1}]"#).unwrap();

        assert!(data_dir.join("sr_ratings.json").exists());
        assert!(!data_dir.join(".sr_ratings.json.tmp").exists());
        assert_eq!(
            store.get("sr_ratings").unwrap().as_deref(),
            Some(r#"[{"id":1}]"#)
        );
    }

    #[test]
    fn test_file_store_write_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let mut store = FileStore::new(&blocker);
        let result = store.set("sr_users", "[]");

        assert!(matches!(result, Err(StorageError::Io(_))));
    }
}
