//! In-memory local repository implementation.
//!
//! Serves a canned [`PredictionResponse`] (or a canned failure) without any
//! network access. Used by tests and offline runs of the server.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::source::models::{PredictedCoordinate, PredictionResponse};
use crate::source::repository::{PredictionRepository, SourceError, SourceResult};

/// In-memory prediction source.
///
/// Clones share the same underlying data, so a test can keep one handle to
/// swap responses while another is owned by the code under test.
///
/// # Example
/// ```
/// use sargassum_drift::source::repositories::LocalRepository;
/// use sargassum_drift::source::PredictionRepository;
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let repo = LocalRepository::new();
/// let response = rt.block_on(repo.fetch_prediction()).unwrap();
/// assert!(response.predicted_coordinates.is_empty());
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

#[derive(Default)]
struct LocalData {
    response: PredictionResponse,
    // Message of the injected failure, if any
    failure: Option<String>,
    fetch_count: usize,
}

impl LocalRepository {
    /// Create a repository that returns an empty prediction.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository that returns the given response.
    pub fn with_response(response: PredictionResponse) -> Self {
        let repo = Self::new();
        repo.set_response(response);
        repo
    }

    /// Create a repository serving the points in upstream order
    /// (`(latitude, longitude, biomass_area)`).
    pub fn with_points(points: &[(f64, f64, Option<f64>)]) -> Self {
        let predicted_coordinates: Vec<PredictedCoordinate> = points
            .iter()
            .map(|&(lat, lon, area)| PredictedCoordinate::new(lat, lon, area))
            .collect();
        let iterations_count = predicted_coordinates.len() as u32;
        Self::with_response(PredictionResponse {
            predicted_coordinates,
            iterations_count,
        })
    }

    /// Create a repository whose every fetch fails.
    pub fn failing(message: impl Into<String>) -> Self {
        let repo = Self::new();
        repo.fail_with(message);
        repo
    }

    /// Replace the served response and clear any injected failure.
    pub fn set_response(&self, response: PredictionResponse) {
        let mut data = self.data.write();
        data.response = response;
        data.failure = None;
    }

    /// Make subsequent fetches fail with a connection error.
    pub fn fail_with(&self, message: impl Into<String>) {
        self.data.write().failure = Some(message.into());
    }

    /// Number of `fetch_prediction` calls served so far (including failures).
    pub fn fetch_count(&self) -> usize {
        self.data.read().fetch_count
    }
}

#[async_trait]
impl PredictionRepository for LocalRepository {
    async fn health_check(&self) -> SourceResult<bool> {
        Ok(self.data.read().failure.is_none())
    }

    async fn fetch_prediction(&self) -> SourceResult<PredictionResponse> {
        let mut data = self.data.write();
        data.fetch_count += 1;
        match data.failure {
            Some(ref message) => Err(SourceError::connection(message.clone())
                .with_operation("fetch_prediction")
                .with_endpoint("local")),
            None => Ok(data.response.clone()),
        }
    }

    fn describe(&self) -> String {
        "local (in-memory)".to_string()
    }
}
