//! Health, access, and backend diagnostics endpoints.

use crate::auth::ApiKey;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use inventory_store::StoreError;
use serde::Serialize;

/// Single-field status response.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// Settings response.
#[derive(Debug, Serialize)]
pub struct SettingsResponse {
    /// The key the caller authenticated with.
    pub api_key: String,
}

/// Database diagnostics response.
#[derive(Debug, Serialize)]
pub struct DatabaseResponse {
    pub status: &'static str,
    pub message: &'static str,
    /// Backend name and version.
    pub database_info: String,
    /// Connection URL with credentials masked.
    pub connection_url: String,
}

/// GET /api/v1/healths/
///
/// Unauthenticated so load balancers can probe it.
pub async fn health_check() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "You app has a good health ✅",
    })
}

/// GET /api/v1/views/
pub async fn secure_view() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "You have access ✅",
    })
}

/// GET /api/v1/settings/
pub async fn settings(ApiKey(api_key): ApiKey) -> Json<SettingsResponse> {
    Json(SettingsResponse { api_key })
}

/// GET /api/v1/database/
pub async fn database_check(State(state): State<AppState>) -> ApiResult<Json<DatabaseResponse>> {
    state.store.health_check().await.map_err(unavailable)?;
    let database_info = state.store.backend_info().await.map_err(unavailable)?;

    Ok(Json(DatabaseResponse {
        status: "success",
        message: "It works ✅",
        database_info,
        connection_url: state.config.store.redacted_url(),
    }))
}

fn unavailable(err: StoreError) -> ApiError {
    ApiError::DatabaseUnavailable(err.to_string())
}

/// Fallback for unmatched paths.
pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

/// Fallback for a matched path with an unsupported method.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
