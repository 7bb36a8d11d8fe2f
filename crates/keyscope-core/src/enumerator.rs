//! Bounded key enumeration over a cursor-based scan.
//!
//! Keys are collected with repeated `SCAN` calls rather than a `KEYS` listing,
//! which would block the store for the whole keyspace. The tradeoff is that a
//! scan is not a snapshot: under concurrent writes keys can be revisited or
//! skipped, and no de-duplication is attempted here.

use tracing::{debug, info_span, warn, Instrument};

use keyscope_observe::attrs;

use keyscope_types::error::ConsoleError;

use crate::store::KeyValueStore;

/// Glob pattern for a search term: `*term*`, or `*` when there is none.
///
/// The term is not escaped. Glob metacharacters (`*`, `?`, `[`, `\`) in the
/// term keep their glob meaning, so the match is only plain substring
/// containment when the term has none of them.
pub fn scan_pattern(search: Option<&str>) -> String {
    match search {
        Some(term) if !term.is_empty() => format!("*{term}*"),
        _ => "*".to_string(),
    }
}

/// Enumerate up to `limit` keys containing `search`, using `limit` as the
/// per-call `COUNT` hint.
pub async fn enumerate<S: KeyValueStore>(
    store: &S,
    search: Option<&str>,
    limit: i64,
) -> Result<Vec<String>, ConsoleError> {
    enumerate_with_batch(store, search, limit, None).await
}

/// Enumerate up to `limit` keys containing `search`.
///
/// Scans from cursor 0 and appends each batch until the store reports the
/// iteration complete (cursor 0) or at least `limit` keys have accumulated,
/// then truncates to exactly `limit`. Order is the store's cursor order.
/// A non-positive `limit` returns an empty list without touching the store.
pub async fn enumerate_with_batch<S: KeyValueStore>(
    store: &S,
    search: Option<&str>,
    limit: i64,
    batch_size: Option<usize>,
) -> Result<Vec<String>, ConsoleError> {
    if limit <= 0 {
        return Ok(Vec::new());
    }
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    let count = batch_size.unwrap_or(limit).max(1);
    let pattern = scan_pattern(search);

    let span = info_span!(
        attrs::SPAN_ENUMERATE,
        { attrs::DB_SYSTEM } = attrs::DB_SYSTEM_REDIS,
        { attrs::DB_OPERATION } = attrs::OP_SCAN,
        { attrs::SCAN_PATTERN } = %pattern,
        { attrs::SCAN_COUNT } = count,
        limit,
    );

    async {
        let mut keys: Vec<String> = Vec::new();
        let mut cursor = 0u64;
        let mut rounds = 0u32;

        loop {
            let page = store.scan(cursor, &pattern, count).await.map_err(|e| {
                warn!(error = %e, rounds, "SCAN failed");
                ConsoleError::from(e)
            })?;
            rounds += 1;
            let last = page.is_last();
            cursor = page.cursor;
            keys.extend(page.keys);

            if last || keys.len() >= limit {
                break;
            }
        }

        keys.truncate(limit);
        debug!(rounds, found = keys.len(), "Key enumeration finished");
        Ok::<_, ConsoleError>(keys)
    }
    .instrument(span)
    .await
}
