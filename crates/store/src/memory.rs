//! In-process inventory store.

use crate::error::{StoreError, StoreResult};
use crate::store::ProductStore;
use async_trait::async_trait;
use inventory_core::{Product, ProductId};
use std::collections::BTreeMap;
use tokio::sync::RwLock;

struct Inventory {
    products: BTreeMap<ProductId, Product>,
    /// Next id to hand out. Only ever increases.
    next_id: ProductId,
}

/// Inventory held in process memory; lost on restart.
pub struct MemoryStore {
    inner: RwLock<Inventory>,
}

impl MemoryStore {
    /// Create an empty store. The first product gets id 1.
    pub fn new() -> Self {
        Self::with_products(std::iter::empty())
    }

    /// Create a store pre-seeded with products.
    ///
    /// Allocation resumes after the highest seeded id.
    pub fn with_products(products: impl IntoIterator<Item = (ProductId, Product)>) -> Self {
        let products: BTreeMap<_, _> = products.into_iter().collect();
        let next_id = products.keys().next_back().map_or(1, |max| max + 1);
        Self {
            inner: RwLock::new(Inventory { products, next_id }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list_all(&self) -> StoreResult<BTreeMap<ProductId, Product>> {
        Ok(self.inner.read().await.products.clone())
    }

    async fn get(&self, id: ProductId) -> StoreResult<Product> {
        self.inner
            .read()
            .await
            .products
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, product: Product) -> StoreResult<ProductId> {
        let mut inventory = self.inner.write().await;
        let id = inventory.next_id;
        inventory.next_id = id
            .checked_add(1)
            .ok_or_else(|| StoreError::Internal("product id space exhausted".to_string()))?;
        inventory.products.insert(id, product);
        Ok(id)
    }

    async fn update(&self, id: ProductId, product: Product) -> StoreResult<Product> {
        let mut inventory = self.inner.write().await;
        let slot = inventory
            .products
            .get_mut(&id)
            .ok_or(StoreError::NotFound(id))?;
        *slot = product;
        Ok(slot.clone())
    }

    async fn delete(&self, id: ProductId) -> StoreResult<Product> {
        self.inner
            .write()
            .await
            .products
            .remove(&id)
            .ok_or(StoreError::NotFound(id))
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn backend_info(&self) -> StoreResult<String> {
        Ok("in-memory".to_string())
    }
}
