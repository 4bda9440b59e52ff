//! HTTP request handlers.

pub mod products;
pub mod system;

pub use products::*;
pub use system::*;
