//! Application state wiring the store and console service together.
//!
//! AppState holds the one store handle used by both CLI commands and REST API
//! handlers. The service is generic over the store trait; AppState pins it to
//! the configured infra backend.

use std::sync::Arc;

use anyhow::Context;

use keyscope_core::service::console::ConsoleService;
use keyscope_infra::backend::StoreBackend;
use keyscope_types::config::{redact_url, ConsoleConfig};

/// Concrete type alias for the service generic pinned to the infra backend.
pub type ConcreteConsoleService = ConsoleService<StoreBackend>;

/// Shared application state.
///
/// Used by both CLI commands and REST API handlers. Built once at startup;
/// the store connection lives as long as the process.
#[derive(Clone)]
pub struct AppState {
    pub console: Arc<ConcreteConsoleService>,
    pub config: Arc<ConsoleConfig>,
}

impl AppState {
    /// Initialize the application state: connect to the store, wire the service.
    pub async fn init(config: ConsoleConfig) -> anyhow::Result<Self> {
        let store = StoreBackend::connect(&config.store)
            .await
            .with_context(|| {
                format!(
                    "Failed to connect to store at {}",
                    redact_url(&config.store.url)
                )
            })?;

        Ok(Self::from_parts(store, config))
    }

    /// Wire state around an already-built store.
    pub fn from_parts(store: StoreBackend, config: ConsoleConfig) -> Self {
        let console = ConsoleService::new(store, config.scan.clone());
        Self {
            console: Arc::new(console),
            config: Arc::new(config),
        }
    }
}
