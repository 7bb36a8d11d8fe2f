//! In-process implementation of `KeyValueStore`.
//!
//! Emulates the Redis commands the console uses closely enough to run the
//! console without a server and to test it. The keyspace is kept sorted; a
//! scan cursor is a slot offset into it and `COUNT` is the number of slots
//! examined per call, so a page can be empty while the scan is unfinished.
//! `MATCH` uses the `glob` crate, which differs from Redis in small ways
//! (negated classes are `[!a]` rather than `[^a]`).

use std::collections::BTreeMap;

use glob::Pattern;
use tokio::sync::RwLock;

use keyscope_core::store::KeyValueStore;
use keyscope_types::error::StoreError;
use keyscope_types::value::{ScanPage, Value, ValueType};

/// Memory-backed implementation of `KeyValueStore`. Nothing is persisted.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value of any type, replacing whatever the key held.
    ///
    /// `Value::Unsupported(tag)` stores a key that reports `tag` from `TYPE`.
    /// An empty list, set or hash removes the key, as Redis does.
    pub async fn insert(&self, key: &str, value: Value) {
        let mut entries = self.entries.write().await;
        let empty = match &value {
            Value::List(items) | Value::Set(items) => items.is_empty(),
            Value::Mapping(fields) => fields.is_empty(),
            Value::Scalar(_) | Value::Unsupported(_) => false,
        };
        if empty {
            entries.remove(key);
        } else {
            entries.insert(key.to_string(), value);
        }
    }
}

fn wrong_type() -> StoreError {
    StoreError::Command(
        "WRONGTYPE Operation against a key holding the wrong kind of value".to_string(),
    )
}

impl KeyValueStore for MemoryStore {
    async fn scan(&self, cursor: u64, pattern: &str, count: usize) -> Result<ScanPage, StoreError> {
        // An unparsable pattern matches nothing, as with Redis.
        let matcher = match Pattern::new(pattern) {
            Ok(p) => Some(p),
            Err(e) => {
                tracing::debug!(pattern, error = %e, "Unparsable scan pattern");
                None
            }
        };

        let entries = self.entries.read().await;
        let start = usize::try_from(cursor).unwrap_or(usize::MAX);
        let examined = entries.keys().skip(start).take(count.max(1));

        let mut keys = Vec::new();
        let mut seen = 0usize;
        for key in examined {
            seen += 1;
            if matcher.as_ref().is_some_and(|m| m.matches(key)) {
                keys.push(key.clone());
            }
        }

        let next = start.saturating_add(seen);
        let cursor = if seen == 0 || next >= entries.len() {
            0
        } else {
            next as u64
        };

        Ok(ScanPage { cursor, keys })
    }

    async fn key_type(&self, key: &str) -> Result<ValueType, StoreError> {
        let entries = self.entries.read().await;
        Ok(match entries.get(key) {
            None => ValueType::None,
            Some(Value::Scalar(_)) => ValueType::String,
            Some(Value::List(_)) => ValueType::List,
            Some(Value::Set(_)) => ValueType::Set,
            Some(Value::Mapping(_)) => ValueType::Hash,
            Some(Value::Unsupported(tag)) => ValueType::Other(tag.clone()),
        })
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.entries.read().await.get(key) {
            None => Ok(None),
            Some(Value::Scalar(s)) => Ok(Some(s.clone())),
            Some(_) => Err(wrong_type()),
        }
    }

    async fn list_range(&self, key: &str) -> Result<Vec<String>, StoreError> {
        match self.entries.read().await.get(key) {
            None => Ok(Vec::new()),
            Some(Value::List(items)) => Ok(items.clone()),
            Some(_) => Err(wrong_type()),
        }
    }

    async fn set_members(&self, key: &str) -> Result<Vec<String>, StoreError> {
        match self.entries.read().await.get(key) {
            None => Ok(Vec::new()),
            Some(Value::Set(members)) => Ok(members.clone()),
            Some(_) => Err(wrong_type()),
        }
    }

    async fn hash_fields(&self, key: &str) -> Result<Vec<(String, String)>, StoreError> {
        match self.entries.read().await.get(key) {
            None => Ok(Vec::new()),
            Some(Value::Mapping(fields)) => Ok(fields.clone()),
            Some(_) => Err(wrong_type()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), Value::Scalar(value.to_string()));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<u64, StoreError> {
        let removed = self.entries.write().await.remove(key);
        Ok(u64::from(removed.is_some()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    async fn seeded() -> MemoryStore {
        let store = MemoryStore::new();
        store.set("user:1", "alice").await.unwrap();
        store.set("user:2", "bob").await.unwrap();
        store.set("session:9", "token").await.unwrap();
        store
    }

    async fn scan_all(store: &MemoryStore, pattern: &str, count: usize) -> Vec<String> {
        let mut cursor = 0;
        let mut keys = Vec::new();
        loop {
            let page = store.scan(cursor, pattern, count).await.unwrap();
            keys.extend(page.keys);
            if page.cursor == 0 {
                return keys;
            }
            cursor = page.cursor;
        }
    }

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let store = MemoryStore::new();
        store.set("greeting", "hello").await.unwrap();
        assert_eq!(store.get("greeting").await.unwrap().as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn test_set_upserts() {
        let store = MemoryStore::new();
        store.set("counter", "1").await.unwrap();
        store.set("counter", "2").await.unwrap();
        assert_eq!(store.get("counter").await.unwrap().as_deref(), Some("2"));
        assert_eq!(store.scan(0, "*", 10).await.unwrap().keys, vec!["counter"]);
    }

    #[tokio::test]
    async fn test_insert_empty_composite_removes_key() {
        let store = MemoryStore::new();
        store.insert("queue", Value::List(strings(&["a"]))).await;
        store.insert("queue", Value::List(Vec::new())).await;
        store.insert("fields", Value::Mapping(Vec::new())).await;
        assert_eq!(store.key_type("queue").await.unwrap(), ValueType::None);
        assert_eq!(store.key_type("fields").await.unwrap(), ValueType::None);
    }

    #[tokio::test]
    async fn test_set_replaces_composite_value() {
        let store = MemoryStore::new();
        store.insert("k", Value::List(strings(&["a"]))).await;
        store.set("k", "plain").await.unwrap();
        assert_eq!(store.key_type("k").await.unwrap(), ValueType::String);
    }

    #[tokio::test]
    async fn test_get_nonexistent_returns_none() {
        let store = MemoryStore::new();
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_counts_removed() {
        let store = seeded().await;
        assert_eq!(store.delete("user:1").await.unwrap(), 1);
        assert_eq!(store.delete("user:1").await.unwrap(), 0);
        assert_eq!(store.key_type("user:1").await.unwrap(), ValueType::None);
    }

    #[tokio::test]
    async fn test_key_types() {
        let store = MemoryStore::new();
        store.set("s", "v").await.unwrap();
        store.insert("l", Value::List(strings(&["a"]))).await;
        store.insert("st", Value::Set(strings(&["a"]))).await;
        store
            .insert("h", Value::Mapping(vec![("f".to_string(), "v".to_string())]))
            .await;
        store.insert("z", Value::Unsupported("zset".to_string())).await;

        assert_eq!(store.key_type("s").await.unwrap(), ValueType::String);
        assert_eq!(store.key_type("l").await.unwrap(), ValueType::List);
        assert_eq!(store.key_type("st").await.unwrap(), ValueType::Set);
        assert_eq!(store.key_type("h").await.unwrap(), ValueType::Hash);
        assert_eq!(
            store.key_type("z").await.unwrap(),
            ValueType::Other("zset".to_string())
        );
        assert_eq!(store.key_type("nope").await.unwrap(), ValueType::None);
    }

    #[tokio::test]
    async fn test_typed_reads_reject_wrong_type() {
        let store = MemoryStore::new();
        store.insert("l", Value::List(strings(&["a"]))).await;
        assert!(matches!(store.get("l").await, Err(StoreError::Command(_))));
        assert!(matches!(store.hash_fields("l").await, Err(StoreError::Command(_))));
        assert_eq!(store.list_range("l").await.unwrap(), strings(&["a"]));
    }

    #[tokio::test]
    async fn test_scan_full_iteration_matches_pattern() {
        let store = seeded().await;
        let keys = scan_all(&store, "*user*", 1).await;
        assert_eq!(keys, strings(&["user:1", "user:2"]));
    }

    #[tokio::test]
    async fn test_scan_star_matches_everything() {
        let store = seeded().await;
        let keys = scan_all(&store, "*", 10).await;
        assert_eq!(keys, strings(&["session:9", "user:1", "user:2"]));
    }

    #[tokio::test]
    async fn test_scan_page_can_be_empty_before_end() {
        let store = seeded().await;
        // First slot in sorted order is "session:9", which does not match.
        let page = store.scan(0, "*user*", 1).await.unwrap();
        assert!(page.keys.is_empty());
        assert_ne!(page.cursor, 0);
    }

    #[tokio::test]
    async fn test_scan_empty_store_completes() {
        let store = MemoryStore::new();
        let page = store.scan(0, "*", 10).await.unwrap();
        assert!(page.is_last());
        assert!(page.keys.is_empty());
    }

    #[tokio::test]
    async fn test_scan_glob_metacharacters_are_live() {
        let store = MemoryStore::new();
        store.set("a1b", "x").await.unwrap();
        store.set("a?b", "y").await.unwrap();
        store.set("ab", "z").await.unwrap();
        let keys = scan_all(&store, "*a?b*", 10).await;
        assert_eq!(keys, strings(&["a1b", "a?b"]));
    }

    #[tokio::test]
    async fn test_scan_invalid_pattern_matches_nothing() {
        let store = seeded().await;
        let keys = scan_all(&store, "*[user*", 10).await;
        assert!(keys.is_empty());
    }

    #[tokio::test]
    async fn test_scan_is_case_sensitive() {
        let store = seeded().await;
        let keys = scan_all(&store, "*USER*", 10).await;
        assert!(keys.is_empty());
    }
}
