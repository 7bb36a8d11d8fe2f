//! Shared domain types for keyscope.
//!
//! Store value types, configuration, and the error taxonomy shared by the
//! core, infrastructure and API layers.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod config;
pub mod error;
pub mod value;
