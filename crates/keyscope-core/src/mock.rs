//! In-crate mock store and span recorder used by the unit tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use keyscope_types::error::StoreError;
use keyscope_types::value::{ScanPage, Value, ValueType};

use crate::store::KeyValueStore;

/// Vec-backed store with insertion-ordered keys.
///
/// Scans walk the entries in order, examining `count` slots per call and
/// filtering by a `*needle*` pattern. Scripted pages replace that walk when
/// a test needs exact cursor sequences.
#[derive(Default)]
pub struct MockStore {
    entries: Mutex<Vec<(String, Value)>>,
    pages: Mutex<Vec<ScanPage>>,
    scripted: bool,
    ghosts: HashMap<String, ValueType>,
    failing: bool,
    pub scan_calls: AtomicUsize,
    pub last_count: AtomicUsize,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(self, key: &str, value: Value) -> Self {
        self.entries
            .lock()
            .unwrap()
            .push((key.to_string(), value));
        self
    }

    pub fn with_scalar(self, key: &str, value: &str) -> Self {
        self.with_value(key, Value::Scalar(value.to_string()))
    }

    /// Serve these pages in order, ignoring cursors and patterns.
    pub fn with_pages(mut self, pages: Vec<ScanPage>) -> Self {
        let mut reversed = pages;
        reversed.reverse();
        *self.pages.lock().unwrap() = reversed;
        self.scripted = true;
        self
    }

    /// A key that reports `value_type` from TYPE but is gone by the read.
    pub fn with_ghost(mut self, key: &str, value_type: ValueType) -> Self {
        self.ghosts.insert(key.to_string(), value_type);
        self
    }

    /// Every command fails with a connection error.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn scan_calls(&self) -> usize {
        self.scan_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing {
            Err(StoreError::Connection("connection refused".to_string()))
        } else {
            Ok(())
        }
    }

    fn lookup(&self, key: &str) -> Option<Value> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    fn matches(pattern: &str, key: &str) -> bool {
        let needle = pattern.trim_matches('*');
        needle.is_empty() || key.contains(needle)
    }
}

fn wrong_type() -> StoreError {
    StoreError::Command(
        "WRONGTYPE Operation against a key holding the wrong kind of value".to_string(),
    )
}

impl KeyValueStore for MockStore {
    async fn scan(&self, cursor: u64, pattern: &str, count: usize) -> Result<ScanPage, StoreError> {
        self.check()?;
        self.scan_calls.fetch_add(1, Ordering::SeqCst);
        self.last_count.store(count, Ordering::SeqCst);

        if self.scripted {
            return Ok(self.pages.lock().unwrap().pop().unwrap_or_default());
        }

        let entries = self.entries.lock().unwrap();
        let start = cursor as usize;
        let end = (start + count).min(entries.len());
        let keys = entries[start.min(end)..end]
            .iter()
            .filter(|(k, _)| Self::matches(pattern, k))
            .map(|(k, _)| k.clone())
            .collect();
        let next = if end >= entries.len() { 0 } else { end as u64 };
        Ok(ScanPage { cursor: next, keys })
    }

    async fn key_type(&self, key: &str) -> Result<ValueType, StoreError> {
        self.check()?;
        if let Some(value_type) = self.ghosts.get(key) {
            return Ok(value_type.clone());
        }
        Ok(match self.lookup(key) {
            None => ValueType::None,
            Some(Value::Scalar(_)) => ValueType::String,
            Some(Value::List(_)) => ValueType::List,
            Some(Value::Set(_)) => ValueType::Set,
            Some(Value::Mapping(_)) => ValueType::Hash,
            Some(Value::Unsupported(tag)) => ValueType::Other(tag),
        })
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check()?;
        match self.lookup(key) {
            None => Ok(None),
            Some(Value::Scalar(s)) => Ok(Some(s)),
            Some(_) => Err(wrong_type()),
        }
    }

    async fn list_range(&self, key: &str) -> Result<Vec<String>, StoreError> {
        self.check()?;
        match self.lookup(key) {
            None => Ok(Vec::new()),
            Some(Value::List(items)) => Ok(items),
            Some(_) => Err(wrong_type()),
        }
    }

    async fn set_members(&self, key: &str) -> Result<Vec<String>, StoreError> {
        self.check()?;
        match self.lookup(key) {
            None => Ok(Vec::new()),
            Some(Value::Set(items)) => Ok(items),
            Some(_) => Err(wrong_type()),
        }
    }

    async fn hash_fields(&self, key: &str) -> Result<Vec<(String, String)>, StoreError> {
        self.check()?;
        match self.lookup(key) {
            None => Ok(Vec::new()),
            Some(Value::Mapping(fields)) => Ok(fields),
            Some(_) => Err(wrong_type()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check()?;
        let mut entries = self.entries.lock().unwrap();
        let value = Value::Scalar(value.to_string());
        match entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value,
            None => entries.push((key.to_string(), value)),
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<u64, StoreError> {
        self.check()?;
        let mut entries = self.entries.lock().unwrap();
        let before = entries.len();
        entries.retain(|(k, _)| k != key);
        Ok((before - entries.len()) as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check()
    }
}

/// Subscriber that records the name and declared fields of every new span.
///
/// Install with `tracing::subscriber::set_default` inside a current-thread
/// test.
#[derive(Clone, Default)]
pub struct SpanRecorder {
    spans: Arc<Mutex<Vec<(String, Vec<String>)>>>,
    next_id: Arc<AtomicU64>,
}

impl SpanRecorder {
    /// Declared field names of the first span called `name`.
    pub fn fields_of(&self, name: &str) -> Option<Vec<String>> {
        self.spans
            .lock()
            .unwrap()
            .iter()
            .find(|(span, _)| span == name)
            .map(|(_, fields)| fields.clone())
    }
}

impl tracing::Subscriber for SpanRecorder {
    fn enabled(&self, _: &tracing::Metadata<'_>) -> bool {
        true
    }

    fn new_span(&self, span: &tracing::span::Attributes<'_>) -> tracing::span::Id {
        let meta = span.metadata();
        let fields = meta.fields().iter().map(|f| f.name().to_string()).collect();
        self.spans
            .lock()
            .unwrap()
            .push((meta.name().to_string(), fields));
        tracing::span::Id::from_u64(self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn record(&self, _: &tracing::span::Id, _: &tracing::span::Record<'_>) {}

    fn record_follows_from(&self, _: &tracing::span::Id, _: &tracing::span::Id) {}

    fn event(&self, _: &tracing::Event<'_>) {}

    fn enter(&self, _: &tracing::span::Id) {}

    fn exit(&self, _: &tracing::span::Id) {}
}
