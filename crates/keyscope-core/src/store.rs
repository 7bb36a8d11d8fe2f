//! Key-value store trait.
//!
//! Defines the boundary between the console and the backing store, expressed
//! as the native query commands the console relies on. Implementations live in
//! keyscope-infra.

use keyscope_types::error::StoreError;
use keyscope_types::value::{ScanPage, ValueType};

/// Trait for the remote key-value store browsed by the console.
///
/// Every method maps to a single atomic store command, so implementations
/// can be shared by concurrent callers without extra locking.
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
pub trait KeyValueStore: Send + Sync {
    /// `SCAN cursor MATCH pattern COUNT count`.
    ///
    /// `count` is a hint: a page may hold fewer (even zero) matching keys
    /// while the returned cursor is still non-zero.
    fn scan(
        &self,
        cursor: u64,
        pattern: &str,
        count: usize,
    ) -> impl std::future::Future<Output = Result<ScanPage, StoreError>> + Send;

    /// `TYPE key`. Absent keys report [`ValueType::None`].
    fn key_type(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<ValueType, StoreError>> + Send;

    /// `GET key`. Returns None if the key does not exist.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StoreError>> + Send;

    /// `LRANGE key 0 -1`.
    fn list_range(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>, StoreError>> + Send;

    /// `SMEMBERS key`.
    fn set_members(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>, StoreError>> + Send;

    /// `HGETALL key`.
    fn hash_fields(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Vec<(String, String)>, StoreError>> + Send;

    /// `SET key value` (upsert).
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;

    /// `DEL key`. Returns the number of keys removed; 0 means the key was absent.
    fn delete(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<u64, StoreError>> + Send;

    /// `PING`.
    fn ping(&self) -> impl std::future::Future<Output = Result<(), StoreError>> + Send;
}
