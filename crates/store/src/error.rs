//! Inventory store error types.

use inventory_core::ProductId;
use thiserror::Error;

/// Inventory store operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("product not found: {0}")]
    NotFound(ProductId),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Whether this error means the requested id does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
