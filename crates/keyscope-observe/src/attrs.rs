//! Span and field names for store instrumentation.
//!
//! Database fields follow the OTel database semantic conventions; the rest
//! are keyscope-specific and share the `keyscope.` prefix. All constants are
//! usable as span names and, wrapped in braces, as field names in
//! `tracing::info_span!` (`{ attrs::DB_SYSTEM } = "redis"`).

// --- Span names ---

/// Bounded key enumeration (the `SCAN` loop).
pub const SPAN_ENUMERATE: &str = "keyscope.enumerate";

/// Typed read of a single key (`TYPE` then the matching read).
pub const SPAN_MATERIALIZE: &str = "keyscope.materialize";

// --- Database attributes ---

/// The database product (always [`DB_SYSTEM_REDIS`]).
pub const DB_SYSTEM: &str = "db.system";

/// The store command issued (e.g., "SCAN").
pub const DB_OPERATION: &str = "db.operation";

// --- Keyscope attributes ---

/// The glob pattern passed to `SCAN MATCH`.
pub const SCAN_PATTERN: &str = "keyscope.scan.pattern";

/// The `COUNT` hint passed to each `SCAN` call.
pub const SCAN_COUNT: &str = "keyscope.scan.count";

/// The key being materialized.
pub const KEY: &str = "keyscope.key";

/// The `TYPE` reply for the key, recorded once known.
pub const VALUE_TYPE: &str = "keyscope.value_type";

// --- Values ---

/// `db.system` value for Redis.
pub const DB_SYSTEM_REDIS: &str = "redis";

/// `db.operation` value for the enumeration loop.
pub const OP_SCAN: &str = "SCAN";
