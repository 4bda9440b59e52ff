//! Server test utilities.

use inventory_core::Product;
use inventory_core::ProductId;
use inventory_core::config::AppConfig;
use inventory_server::{AppState, create_router};
use inventory_store::{MemoryStore, ProductStore, fixtures::seed_products};
use std::sync::Arc;

/// API key accepted by every test server.
#[allow(dead_code)]
pub const TEST_API_KEY: &str = "testing";

/// A test server wrapper with all dependencies.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a test server over the fixture inventory.
    pub fn new() -> Self {
        Self::with_products(seed_products())
    }

    /// Create a test server over an empty in-memory store.
    pub fn empty() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// Create a test server over an in-memory store holding `products`.
    pub fn with_products(products: impl IntoIterator<Item = (ProductId, Product)>) -> Self {
        Self::with_store(Arc::new(MemoryStore::with_products(products)))
    }

    /// Create a test server over any store.
    pub fn with_store(store: Arc<dyn ProductStore>) -> Self {
        Self::with_config(store, |_| {})
    }

    /// Create a test server with custom config modifications.
    pub fn with_config<F>(store: Arc<dyn ProductStore>, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = AppConfig::for_testing();
        modifier(&mut config);

        let state = AppState::new(config, store);
        let router = create_router(state.clone());

        Self { router, state }
    }

    /// Get access to the underlying store.
    pub fn store(&self) -> Arc<dyn ProductStore> {
        self.state.store.clone()
    }
}
