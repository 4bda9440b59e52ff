//! Store test doubles.

use async_trait::async_trait;
use inventory_core::{Product, ProductId};
use inventory_store::{ProductStore, StoreError, StoreResult};
use std::collections::BTreeMap;

/// A store whose every operation fails as if the backend were down.
#[allow(dead_code)]
pub struct FailingStore;

#[allow(dead_code)]
fn down() -> StoreError {
    StoreError::Internal("connection refused".to_string())
}

#[async_trait]
impl ProductStore for FailingStore {
    async fn list_all(&self) -> StoreResult<BTreeMap<ProductId, Product>> {
        Err(down())
    }

    async fn get(&self, _id: ProductId) -> StoreResult<Product> {
        Err(down())
    }

    async fn create(&self, _product: Product) -> StoreResult<ProductId> {
        Err(down())
    }

    async fn update(&self, _id: ProductId, _product: Product) -> StoreResult<Product> {
        Err(down())
    }

    async fn delete(&self, _id: ProductId) -> StoreResult<Product> {
        Err(down())
    }

    async fn health_check(&self) -> StoreResult<()> {
        Err(down())
    }

    async fn backend_info(&self) -> StoreResult<String> {
        Err(down())
    }
}
