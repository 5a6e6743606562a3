//! Source factory for dependency injection.
//!
//! Picks and builds the prediction source from runtime configuration.

use std::str::FromStr;
use std::sync::Arc;

use super::repositories::LocalRepository;
#[cfg(feature = "http-source")]
use super::repositories::{HttpRepository, HttpSourceConfig};
use super::repository::{PredictionRepository, SourceError, SourceResult};
use crate::config::SourceSettings;

/// Source type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    /// Remote prediction endpoint over HTTP
    Http,
    /// In-memory local source
    Local,
}

impl FromStr for SourceType {
    type Err = String;

    /// Parse source type from string ("http", "local").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" | "https" | "remote" => Ok(Self::Http),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown source type: {}", s)),
        }
    }
}

/// Factory for creating prediction sources.
pub struct SourceFactory;

impl SourceFactory {
    /// Create a source from the `[source]` configuration section.
    pub fn create(settings: &SourceSettings) -> SourceResult<Arc<dyn PredictionRepository>> {
        let source_type = SourceType::from_str(&settings.source_type)
            .map_err(|e| SourceError::configuration(e).with_operation("SourceFactory::create"))?;

        match source_type {
            SourceType::Http => {
                #[cfg(feature = "http-source")]
                {
                    let repo = HttpRepository::new(HttpSourceConfig {
                        url: settings.url.clone(),
                        timeout: settings.timeout(),
                        skip_browser_warning: settings.skip_browser_warning,
                    })?;
                    Ok(Arc::new(repo) as Arc<dyn PredictionRepository>)
                }
                #[cfg(not(feature = "http-source"))]
                {
                    Err(SourceError::configuration("http source feature not enabled")
                        .with_operation("SourceFactory::create"))
                }
            }
            SourceType::Local => Ok(Self::create_local()),
        }
    }

    /// Create an empty in-memory source.
    pub fn create_local() -> Arc<dyn PredictionRepository> {
        Arc::new(LocalRepository::new())
    }
}
