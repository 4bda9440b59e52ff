//! Core domain types and shared logic for the inventory API.
//!
//! This crate defines the data model used across all other crates:
//! - Product records and their validation rules
//! - Layered application configuration
//! - The core error type

pub mod config;
pub mod error;
pub mod product;

pub use config::{AppConfig, AuthConfig, ServerConfig, StoreConfig};
pub use error::{Error, Result};
pub use product::{Product, ProductId, ValidationError, Violation};
