//! Concrete prediction sources.

#[cfg(feature = "http-source")]
pub mod http;
pub mod local;

#[cfg(feature = "http-source")]
pub use http::{HttpRepository, HttpSourceConfig};
pub use local::LocalRepository;
