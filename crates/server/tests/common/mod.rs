//! Common test utilities and fixtures.

pub mod request;
pub mod server;
pub mod store;

#[allow(unused_imports)]
pub use request::*;
#[allow(unused_imports)]
pub use server::*;
#[allow(unused_imports)]
pub use store::*;
