//! HTTP API server for the product inventory.
//!
//! This crate provides:
//! - Product CRUD endpoints under `/api/v1/product`
//! - The shared-secret `X-API-KEY` gate
//! - Health, access, settings, and database diagnostics endpoints

pub mod auth;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use auth::{ApiKey, ApiKeyGate, TraceId};
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
