//! Key enumeration, value materialization and the store trait for keyscope.
//!
//! This crate defines the [`store::KeyValueStore`] port that the
//! infrastructure layer implements, and the console logic built on it. It
//! depends only on `keyscope-types` -- never on `keyscope-infra` or any
//! client crate.

pub mod enumerator;
pub mod materializer;
pub mod service;
pub mod store;

#[cfg(test)]
mod mock;
