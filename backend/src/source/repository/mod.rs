//! Repository trait for the prediction data source.
//!
//! The core only ever asks one question of its provider: "give me the current
//! prediction". Network, caching and retry concerns live behind this trait.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for data-source operations

pub mod error;

pub use error::{ErrorContext, SourceError, SourceResult};

use async_trait::async_trait;

use super::models::PredictionResponse;

/// Asynchronous provider of drift predictions.
///
/// # Example
///
/// ```ignore
/// async fn load<R: PredictionRepository + ?Sized>(repo: &R) -> SourceResult<usize> {
///     let response = repo.fetch_prediction().await?;
///     Ok(response.predicted_coordinates.len())
/// }
/// ```
#[async_trait]
pub trait PredictionRepository: Send + Sync {
    /// Whether the provider is currently reachable.
    async fn health_check(&self) -> SourceResult<bool>;

    /// Fetch the current prediction, in upstream order.
    async fn fetch_prediction(&self) -> SourceResult<PredictionResponse>;

    /// Short human readable description used in logs and health output.
    fn describe(&self) -> String;
}
