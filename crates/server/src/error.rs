//! API error types.

use crate::auth::API_KEY_HEADER;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use inventory_core::{ProductId, ValidationError, Violation};
use inventory_store::StoreError;
use serde::Serialize;

/// Error detail: a message, or the list of violated constraints.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    Message(String),
    Violations(Vec<Violation>),
}

/// API error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub code: &'static str,
    /// Human-readable detail.
    pub detail: ErrorDetail,
}

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("missing x-api-key header")]
    MissingCredential,

    #[error("Invalid API Key")]
    Unauthorized,

    #[error("product {0} not found")]
    NotFound(ProductId),

    #[error("Database connection failed: {0}")]
    DatabaseUnavailable(String),

    #[error("Not Found")]
    RouteNotFound,

    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id),
            other => Self::Store(other),
        }
    }
}

impl ApiError {
    /// Get the error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::MissingCredential => "missing_credential",
            Self::Unauthorized => "unauthorized",
            Self::NotFound(_) => "not_found",
            Self::DatabaseUnavailable(_) => "database_unavailable",
            Self::RouteNotFound => "route_not_found",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::Store(_) => "store_error",
        }
    }

    /// Get the HTTP status code for this error.
    ///
    /// A missing credential is a missing required parameter, so it is
    /// reported as 422 alongside body validation failures rather than 401.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::MissingCredential => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthorized => StatusCode::FORBIDDEN,
            Self::NotFound(_) | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::DatabaseUnavailable(_) | Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the response detail for this error.
    pub fn detail(&self) -> ErrorDetail {
        match self {
            Self::Validation(err) => ErrorDetail::Violations(err.violations.clone()),
            Self::MissingCredential => {
                ErrorDetail::Violations(vec![Violation::new(API_KEY_HEADER, "field required")])
            }
            Self::NotFound(_) => ErrorDetail::Message("Product Not Found".to_string()),
            // Backend error text stays in the server log
            Self::Store(_) => ErrorDetail::Message("Internal Server Error".to_string()),
            other => ErrorDetail::Message(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "Request failed");
        }
        let body = ErrorResponse {
            code: self.code(),
            detail: self.detail(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
