//! Infrastructure layer for keyscope.
//!
//! Contains the implementations of the store trait defined in `keyscope-core`
//! (Redis, in-memory), backend selection, and configuration loading.

pub mod backend;
pub mod config;
pub mod memory;
pub mod redis_store;
