//! Health endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use keyscope_types::config::BackendKind;

use crate::state::AppState;

/// GET /health - Service version and store reachability (`PING`).
///
/// Answers 503 when the store does not respond, so load balancers can take
/// the console out of rotation.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let backend = match state.console.store().kind() {
        BackendKind::Redis => "redis",
        BackendKind::Memory => "memory",
    };

    let (status, reachable, error) = match state.console.health().await {
        Ok(()) => (StatusCode::OK, true, None),
        Err(e) => {
            tracing::warn!(error = %e, "Store health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, false, Some(e.to_string()))
        }
    };

    (
        status,
        Json(serde_json::json!({
            "status": if reachable { "ok" } else { "degraded" },
            "version": env!("CARGO_PKG_VERSION"),
            "store": {
                "backend": backend,
                "reachable": reachable,
                "error": error,
            },
        })),
    )
}
