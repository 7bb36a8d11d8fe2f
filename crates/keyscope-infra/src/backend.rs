//! Store selection.
//!
//! `KeyValueStore` uses RPITIT and is not object-safe, so the configured
//! backend is picked through an enum rather than a trait object.

use keyscope_core::store::KeyValueStore;
use keyscope_types::config::{BackendKind, StoreConfig};
use keyscope_types::error::StoreError;
use keyscope_types::value::{ScanPage, ValueType};

use crate::memory::MemoryStore;
use crate::redis_store::RedisStore;

/// The store the console talks to, as chosen by `[store] backend`.
pub enum StoreBackend {
    Redis(RedisStore),
    Memory(MemoryStore),
}

impl StoreBackend {
    /// Build the configured backend. Connects eagerly for Redis.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        match config.backend {
            BackendKind::Redis => Ok(StoreBackend::Redis(RedisStore::connect(config).await?)),
            BackendKind::Memory => {
                tracing::warn!("Using the in-memory store; data will not outlive the process");
                Ok(StoreBackend::Memory(MemoryStore::new()))
            }
        }
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            StoreBackend::Redis(_) => BackendKind::Redis,
            StoreBackend::Memory(_) => BackendKind::Memory,
        }
    }
}

impl From<MemoryStore> for StoreBackend {
    fn from(store: MemoryStore) -> Self {
        StoreBackend::Memory(store)
    }
}

impl KeyValueStore for StoreBackend {
    async fn scan(&self, cursor: u64, pattern: &str, count: usize) -> Result<ScanPage, StoreError> {
        match self {
            StoreBackend::Redis(s) => s.scan(cursor, pattern, count).await,
            StoreBackend::Memory(s) => s.scan(cursor, pattern, count).await,
        }
    }

    async fn key_type(&self, key: &str) -> Result<ValueType, StoreError> {
        match self {
            StoreBackend::Redis(s) => s.key_type(key).await,
            StoreBackend::Memory(s) => s.key_type(key).await,
        }
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            StoreBackend::Redis(s) => s.get(key).await,
            StoreBackend::Memory(s) => s.get(key).await,
        }
    }

    async fn list_range(&self, key: &str) -> Result<Vec<String>, StoreError> {
        match self {
            StoreBackend::Redis(s) => s.list_range(key).await,
            StoreBackend::Memory(s) => s.list_range(key).await,
        }
    }

    async fn set_members(&self, key: &str) -> Result<Vec<String>, StoreError> {
        match self {
            StoreBackend::Redis(s) => s.set_members(key).await,
            StoreBackend::Memory(s) => s.set_members(key).await,
        }
    }

    async fn hash_fields(&self, key: &str) -> Result<Vec<(String, String)>, StoreError> {
        match self {
            StoreBackend::Redis(s) => s.hash_fields(key).await,
            StoreBackend::Memory(s) => s.hash_fields(key).await,
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            StoreBackend::Redis(s) => s.set(key, value).await,
            StoreBackend::Memory(s) => s.set(key, value).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<u64, StoreError> {
        match self {
            StoreBackend::Redis(s) => s.delete(key).await,
            StoreBackend::Memory(s) => s.delete(key).await,
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        match self {
            StoreBackend::Redis(s) => s.ping().await,
            StoreBackend::Memory(s) => s.ping().await,
        }
    }
}
