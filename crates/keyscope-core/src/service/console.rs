//! Console service: the four operator operations plus listing helpers.
//!
//! ConsoleService validates caller input, applies the configured scan limits,
//! and turns store failures into [`ConsoleError`]s. Every operation is a single
//! independent round of store commands; nothing is cached between calls.

use futures_util::future::join_all;
use tracing::{info, warn};

use keyscope_types::config::ScanConfig;
use keyscope_types::error::ConsoleError;
use keyscope_types::value::{KeyEntry, Value};

use crate::enumerator::enumerate_with_batch;
use crate::materializer::materialize;
use crate::store::KeyValueStore;

/// Service for browsing and editing keys in a [`KeyValueStore`].
///
/// The store handle is shared by all concurrent callers; it is built once by
/// the hosting process and injected here.
pub struct ConsoleService<S: KeyValueStore> {
    store: S,
    scan: ScanConfig,
}

impl<S: KeyValueStore> ConsoleService<S> {
    pub fn new(store: S, scan: ScanConfig) -> Self {
        Self { store, scan }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve a caller-supplied limit: the configured default when absent,
    /// capped at the configured maximum otherwise.
    pub fn resolve_limit(&self, limit: Option<i64>) -> i64 {
        limit
            .unwrap_or(self.scan.default_limit)
            .min(self.scan.max_limit)
    }

    /// List up to `limit` keys containing `search`.
    pub async fn list_keys(
        &self,
        search: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<String>, ConsoleError> {
        let limit = self.resolve_limit(limit);
        enumerate_with_batch(&self.store, search, limit, self.scan.batch_size).await
    }

    /// Materialize a key's value.
    pub async fn get_value(&self, key: &str) -> Result<Value, ConsoleError> {
        validate_key(key)?;
        materialize(&self.store, key).await
    }

    /// Create or overwrite a scalar value.
    pub async fn set_value(&self, key: &str, value: &str) -> Result<(), ConsoleError> {
        validate_key(key)?;
        if value.is_empty() {
            return Err(ConsoleError::InvalidInput(
                "Key and value are required".to_string(),
            ));
        }

        self.store.set(key, value).await.map_err(|e| {
            warn!(key, error = %e, "SET failed");
            ConsoleError::from(e)
        })?;

        info!(key, "Key set");
        Ok(())
    }

    /// Delete a key. Deleting an absent key is `KeyNotFound`.
    pub async fn delete_key(&self, key: &str) -> Result<(), ConsoleError> {
        validate_key(key)?;

        let removed = self.store.delete(key).await.map_err(|e| {
            warn!(key, error = %e, "DEL failed");
            ConsoleError::from(e)
        })?;

        if removed == 0 {
            return Err(ConsoleError::KeyNotFound(key.to_string()));
        }

        info!(key, "Key deleted");
        Ok(())
    }

    /// List keys together with their display values.
    ///
    /// Values are materialized concurrently, one store round per key. A key
    /// whose value cannot be read (deleted in between, store error) is still
    /// listed, without a value.
    pub async fn list_entries(
        &self,
        search: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Vec<KeyEntry>, ConsoleError> {
        let keys = self.list_keys(search, limit).await?;

        let values = join_all(keys.iter().map(|key| materialize(&self.store, key))).await;

        Ok(keys
            .into_iter()
            .zip(values)
            .map(|(key, value)| {
                let value = match value {
                    Ok(v) => Some(v.display()),
                    Err(e) => {
                        warn!(key = %key, error = %e, "Skipping value for listed key");
                        None
                    }
                };
                KeyEntry { key, value }
            })
            .collect())
    }

    /// Check that the store answers `PING`.
    pub async fn health(&self) -> Result<(), ConsoleError> {
        self.store.ping().await.map_err(ConsoleError::from)
    }
}

fn validate_key(key: &str) -> Result<(), ConsoleError> {
    if key.is_empty() {
        return Err(ConsoleError::InvalidInput(
            "Key parameter is required".to_string(),
        ));
    }
    Ok(())
}
