//! Observability setup for keyscope: structured logging and optional
//! OpenTelemetry span export.

pub mod attrs;
pub mod tracing_setup;
