//! Product CRUD endpoints.

use crate::error::ApiResult;
use crate::extract::{ProductBody, ProductIdPath, id_and_body};
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use inventory_core::{Product, ProductId};
use serde::Serialize;
use std::collections::BTreeMap;

/// Response for create and update.
#[derive(Debug, Serialize)]
pub struct ProductEnvelope {
    pub status: &'static str,
    pub product_id: ProductId,
    pub product: Product,
}

/// Response for delete.
#[derive(Debug, Serialize)]
pub struct DeletedProductEnvelope {
    pub status: &'static str,
    pub product_id: ProductId,
    pub deleted_product: Product,
}

/// GET /api/v1/product/
pub async fn list_products(
    State(state): State<AppState>,
) -> ApiResult<Json<BTreeMap<ProductId, Product>>> {
    Ok(Json(state.store.list_all().await?))
}

/// GET /api/v1/product/{id}
pub async fn get_product(
    State(state): State<AppState>,
    ProductIdPath(product_id): ProductIdPath,
) -> ApiResult<Json<Product>> {
    Ok(Json(state.store.get(product_id).await?))
}

/// POST /api/v1/product/create
pub async fn create_product(
    State(state): State<AppState>,
    ProductBody(product): ProductBody,
) -> ApiResult<Json<ProductEnvelope>> {
    let product_id = state.store.create(product.clone()).await?;
    tracing::info!(product_id, name = %product.name, "Product created");

    Ok(Json(ProductEnvelope {
        status: "Product added successfully",
        product_id,
        product,
    }))
}

/// PUT /api/v1/product/update/{id}
pub async fn update_product(
    State(state): State<AppState>,
    id: ApiResult<ProductIdPath>,
    body: ApiResult<ProductBody>,
) -> ApiResult<Json<ProductEnvelope>> {
    let (product_id, product) = id_and_body(id, body)?;
    let product = state.store.update(product_id, product).await?;
    tracing::info!(product_id, "Product updated");

    Ok(Json(ProductEnvelope {
        status: "Product updated successfully",
        product_id,
        product,
    }))
}

/// DELETE /api/v1/product/remove/{id}
pub async fn remove_product(
    State(state): State<AppState>,
    ProductIdPath(product_id): ProductIdPath,
) -> ApiResult<Json<DeletedProductEnvelope>> {
    let deleted_product = state.store.delete(product_id).await?;
    tracing::info!(product_id, "Product deleted");

    Ok(Json(DeletedProductEnvelope {
        status: "Deleted product successfully",
        product_id,
        deleted_product,
    }))
}
