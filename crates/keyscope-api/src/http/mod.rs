//! HTTP/REST API layer for keyscope.
//!
//! Axum-based REST API at `/api/redis/` with a flat success/error envelope,
//! CORS support, and optional static serving of the browser console.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
