//! Application state for the HTTP server.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::models::{CoastalRegistry, DriftSeries};
use crate::render::RenderOptions;
use crate::services::{adapt, compute_statistics, load_series, DerivedStatistics};
use crate::source::{PredictionRepository, SourceResult};

/// A series as currently served, with its statistics.
#[derive(Debug, Clone)]
pub struct LoadedPrediction {
    pub series: Arc<DriftSeries>,
    pub statistics: Arc<DerivedStatistics>,
    pub loaded_at: DateTime<Utc>,
}

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Prediction provider
    pub repository: Arc<dyn PredictionRepository>,
    pub registry: Arc<CoastalRegistry>,
    pub render_options: RenderOptions,
    loaded: Arc<RwLock<Option<LoadedPrediction>>>,
}

impl AppState {
    /// Create a new application state with the given source.
    pub fn new(repository: Arc<dyn PredictionRepository>) -> Self {
        Self {
            repository,
            registry: CoastalRegistry::shared(),
            render_options: RenderOptions::default(),
            loaded: Arc::new(RwLock::new(None)),
        }
    }

    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// The served prediction, fetching it on first use.
    pub async fn prediction(&self) -> LoadedPrediction {
        let cached = self.loaded.read().clone();
        match cached {
            Some(loaded) => loaded,
            None => self.reload().await,
        }
    }

    /// Re-fetch from the source. Failures yield the fallback series.
    pub async fn reload(&self) -> LoadedPrediction {
        let series = load_series(self.repository.as_ref()).await;
        self.store(series)
    }

    /// Re-fetch from the source, surfacing failures instead of falling back.
    /// The served prediction is left untouched on error.
    pub async fn reload_strict(&self) -> SourceResult<LoadedPrediction> {
        let response = self.repository.fetch_prediction().await?;
        Ok(self.store(adapt(Ok(response))))
    }

    fn store(&self, series: DriftSeries) -> LoadedPrediction {
        let statistics = compute_statistics(series.samples(), &self.registry);
        let loaded = LoadedPrediction {
            series: Arc::new(series),
            statistics: Arc::new(statistics),
            loaded_at: Utc::now(),
        };
        *self.loaded.write() = Some(loaded.clone());
        loaded
    }
}
