//! Inventory store abstraction and implementations.
//!
//! The store is the system of record for products. Two backends exist:
//! an in-process map (the default) and SQLite, selected by
//! `store.database_url`.

pub mod error;
pub mod fixtures;
pub mod memory;
pub mod sqlite;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::ProductStore;

use inventory_core::config::StoreConfig;
use std::sync::Arc;

/// Create an inventory store from configuration.
pub async fn from_config(config: &StoreConfig) -> StoreResult<Arc<dyn ProductStore>> {
    match &config.database_url {
        Some(url) => {
            if !url.starts_with("sqlite:") {
                return Err(StoreError::Config(format!(
                    "unsupported database url '{}': only sqlite: urls are supported",
                    config.redacted_url()
                )));
            }
            tracing::info!(url = %config.redacted_url(), "Connecting to SQLite inventory store");
            let store = SqliteStore::new(url, config.max_connections).await?;
            if config.seed_fixtures {
                store.seed_if_empty(fixtures::seed_products()).await?;
            }
            Ok(Arc::new(store) as Arc<dyn ProductStore>)
        }
        None => {
            tracing::info!(
                seed_fixtures = config.seed_fixtures,
                "Using in-memory inventory store"
            );
            let store = if config.seed_fixtures {
                MemoryStore::with_products(fixtures::seed_products())
            } else {
                MemoryStore::new()
            };
            Ok(Arc::new(store) as Arc<dyn ProductStore>)
        }
    }
}
