//! Envelope response format for all API responses.
//!
//! Every response is a flat object tagged with `success`, with the payload
//! fields inlined next to it:
//! ```json
//! {
//!   "success": true,
//!   "keys": ["user:1", "user:2"],
//!   "meta": { "request_id": "...", "timestamp": "...", "response_time_ms": 5 }
//! }
//! ```
//! Failures carry `"success": false` and a human-readable `error` instead of a
//! payload.

use serde::Serialize;

use keyscope_types::value::KeyEntry;

/// Envelope response wrapping all API data.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,

    /// The response payload, inlined into the envelope.
    #[serde(flatten)]
    pub data: Option<T>,

    /// Human-readable error message (failures only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Request metadata.
    pub meta: ApiMeta,
}

/// Metadata included in every response.
#[derive(Debug, Serialize)]
pub struct ApiMeta {
    /// Unique request identifier for tracing.
    pub request_id: String,
    /// ISO-8601 timestamp of the response.
    pub timestamp: String,
    /// Response time in milliseconds.
    pub response_time_ms: u64,
}

impl ApiMeta {
    pub fn new(request_id: String, response_time_ms: u64) -> Self {
        Self {
            request_id,
            timestamp: chrono::Utc::now().to_rfc3339(),
            response_time_ms,
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a success response with data.
    pub fn success(data: T, request_id: String, response_time_ms: u64) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            meta: ApiMeta::new(request_id, response_time_ms),
        }
    }
}

impl ApiResponse<()> {
    /// Create a failure response (no data).
    pub fn failure(message: String, request_id: String, response_time_ms: u64) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            meta: ApiMeta::new(request_id, response_time_ms),
        }
    }
}

/// `GET /api/redis/keys` payload.
#[derive(Debug, Serialize)]
pub struct KeysData {
    pub keys: Vec<String>,
}

/// `GET /api/redis/entries` payload.
#[derive(Debug, Serialize)]
pub struct EntriesData {
    pub entries: Vec<KeyEntry>,
}

/// `GET /api/redis/value` payload.
#[derive(Debug, Serialize)]
pub struct ValueData {
    pub key: String,
    pub value: String,
}

/// `POST /api/redis/set` payload.
#[derive(Debug, Serialize)]
pub struct SetData {
    pub key: String,
}

/// `DELETE /api/redis/delete` payload.
#[derive(Debug, Serialize)]
pub struct DeleteData {
    pub message: String,
}
