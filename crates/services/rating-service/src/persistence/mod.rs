//! Persistence layer - key-value media and the gateway that mirrors the
//! in-memory collections into them.

mod gateway;
mod key_value;

pub use gateway::PersistenceGateway;
pub use key_value::{FileStore, KeyValueStore, MemoryStore, StorageError};

#[cfg(any(test, feature = "test-utils"))]
pub use key_value::MockKeyValueStore;
