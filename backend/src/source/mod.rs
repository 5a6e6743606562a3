//! Prediction data source.
//!
//! - [`models`]: wire types of the provider payload
//! - [`repository`]: the [`PredictionRepository`] trait and its error types
//! - [`repositories`]: HTTP and in-memory implementations
//! - [`factory`]: builds a source from configuration

pub mod factory;
pub mod models;
pub mod repositories;
pub mod repository;

/// Default prediction endpoint.
pub const DEFAULT_PREDICTION_URL: &str =
    "https://sargazoai-backend-production.up.railway.app/api/Coordinate/predict?iterations=15";

pub use factory::{SourceFactory, SourceType};
pub use models::{PredictedCoordinate, PredictionResponse};
#[cfg(feature = "http-source")]
pub use repositories::{HttpRepository, HttpSourceConfig};
pub use repositories::LocalRepository;
pub use repository::{ErrorContext, PredictionRepository, SourceError, SourceResult};
