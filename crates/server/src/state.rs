//! Application state shared across handlers.

use crate::auth::ApiKeyGate;
use inventory_core::config::AppConfig;
use inventory_store::ProductStore;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Product store.
    pub store: Arc<dyn ProductStore>,
    /// API key gate built from `config.auth`.
    pub gate: ApiKeyGate,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: AppConfig, store: Arc<dyn ProductStore>) -> Self {
        let gate = ApiKeyGate::new(config.auth.api_key.as_str());
        Self {
            config: Arc::new(config),
            store,
            gate,
        }
    }
}
