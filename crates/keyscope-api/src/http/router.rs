//! Axum router configuration with middleware.
//!
//! Key routes are under `/api/redis/`.
//! Middleware: CORS, compression, tracing.
//!
//! The browser console is served from `web/` (configurable via
//! `[server] web_dir` or `KEYSCOPE_WEB_DIR`). API routes take priority;
//! unknown paths fall through to the console's `index.html`. If the directory
//! does not exist, only the API is served.

use std::path::Path;

use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let web_dir = resolve_web_dir(state.config.server.web_dir.as_deref());

    let api_routes = Router::new()
        .route("/keys", get(handlers::keys::list_keys))
        .route("/entries", get(handlers::keys::list_entries))
        .route("/value", get(handlers::keys::get_value))
        .route("/set", post(handlers::keys::set_value))
        .route("/delete", delete(handlers::keys::delete_key));

    let mut router = Router::new()
        .nest("/api/redis", api_routes)
        .route("/health", get(handlers::health::health_check))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if Path::new(&web_dir).exists() {
        let index_path = format!("{web_dir}/index.html");
        let serve_dir = ServeDir::new(&web_dir).fallback(ServeFile::new(index_path));
        router = router.fallback_service(serve_dir);
        tracing::info!(path = %web_dir, "Console static file serving enabled");
    } else {
        tracing::debug!(path = %web_dir, "Console asset directory not found; serving API only");
    }

    router
}

/// `KEYSCOPE_WEB_DIR` wins over the config value; `web` is the default.
fn resolve_web_dir(configured: Option<&str>) -> String {
    std::env::var("KEYSCOPE_WEB_DIR")
        .ok()
        .or_else(|| configured.map(str::to_string))
        .unwrap_or_else(|| "web".to_string())
}
