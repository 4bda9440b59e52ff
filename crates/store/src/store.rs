//! The inventory store trait.

use crate::error::StoreResult;
use async_trait::async_trait;
use inventory_core::{Product, ProductId};
use std::collections::BTreeMap;

/// System of record mapping product ids to product records.
///
/// The store owns id allocation: callers never supply an id to `create`,
/// and an id handed out once is never handed out again.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Snapshot of every product.
    async fn list_all(&self) -> StoreResult<BTreeMap<ProductId, Product>>;

    /// Look up a product by id.
    async fn get(&self, id: ProductId) -> StoreResult<Product>;

    /// Insert a product under a freshly allocated id.
    async fn create(&self, product: Product) -> StoreResult<ProductId>;

    /// Replace the product at `id` wholesale, returning the stored record.
    async fn update(&self, id: ProductId, product: Product) -> StoreResult<Product>;

    /// Remove the product at `id`, returning the removed record.
    async fn delete(&self, id: ProductId) -> StoreResult<Product>;

    /// Check backend connectivity and health.
    async fn health_check(&self) -> StoreResult<()>;

    /// Human-readable description of the backend.
    async fn backend_info(&self) -> StoreResult<String>;
}
