//! Rating Service Library
//!
//! Role-based store rating: administrators manage users and stores, normal
//! users discover and rate stores, store owners follow the ratings of their
//! own store. All state lives in a [`DomainStore`] that mirrors its
//! collections into a key-value medium after every change.

pub mod config;
pub mod persistence;
pub mod service;

use tracing::info;

use crate::config::RatingServiceConfig;
use crate::persistence::{FileStore, PersistenceGateway};

pub use crate::service::DomainStore;

/// Open the domain store persisted in the configured data directory.
pub fn open_store(config: &RatingServiceConfig) -> DomainStore {
    let backend = FileStore::new(&config.storage.data_dir);
    info!(data_dir = %backend.dir().display(), "Opening rating store");
    DomainStore::open(PersistenceGateway::new(backend))
}
