//! HTTP repository backed by the public prediction endpoint.

use async_trait::async_trait;
use std::time::Duration;

use crate::source::models::PredictionResponse;
use crate::source::repository::{PredictionRepository, SourceError, SourceResult};
use crate::source::DEFAULT_PREDICTION_URL;

/// Header that suppresses the interstitial page of tunnelled deployments.
const SKIP_BROWSER_WARNING_HEADER: &str = "ngrok-skip-browser-warning";

/// Settings for [`HttpRepository`].
#[derive(Debug, Clone, PartialEq)]
pub struct HttpSourceConfig {
    pub url: String,
    pub timeout: Duration,
    pub skip_browser_warning: bool,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_PREDICTION_URL.to_string(),
            timeout: Duration::from_secs(30),
            skip_browser_warning: true,
        }
    }
}

/// Prediction source that performs a single GET per fetch. No retries.
#[derive(Debug, Clone)]
pub struct HttpRepository {
    client: reqwest::Client,
    config: HttpSourceConfig,
}

impl HttpRepository {
    pub fn new(config: HttpSourceConfig) -> SourceResult<Self> {
        if config.url.trim().is_empty() {
            return Err(SourceError::configuration("prediction URL is empty")
                .with_operation("HttpRepository::new"));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                SourceError::configuration(format!("failed to build HTTP client: {}", e))
                    .with_operation("HttpRepository::new")
            })?;

        Ok(Self { client, config })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    fn request(&self) -> reqwest::RequestBuilder {
        let request = self.client.get(&self.config.url);
        if self.config.skip_browser_warning {
            request.header(SKIP_BROWSER_WARNING_HEADER, "true")
        } else {
            request
        }
    }
}

#[async_trait]
impl PredictionRepository for HttpRepository {
    async fn health_check(&self) -> SourceResult<bool> {
        let response = self
            .request()
            .send()
            .await
            .map_err(|e| SourceError::from(e).with_operation("health_check"))?;
        Ok(response.status().is_success())
    }

    async fn fetch_prediction(&self) -> SourceResult<PredictionResponse> {
        log::debug!("Fetching prediction from {}", self.config.url);

        let response = self
            .request()
            .send()
            .await
            .map_err(|e| SourceError::from(e).with_operation("fetch_prediction"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::upstream_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("unexpected status"),
            )
            .with_operation("fetch_prediction")
            .with_endpoint(self.config.url.clone()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::from(e).with_operation("fetch_prediction"))?;

        let prediction: PredictionResponse = serde_json::from_str(&body).map_err(|e| {
            SourceError::from(e)
                .with_operation("fetch_prediction")
                .with_endpoint(self.config.url.clone())
                .with_details(format!("{} byte body", body.len()))
        })?;

        log::info!(
            "Received {} predicted coordinates ({} iterations)",
            prediction.predicted_coordinates.len(),
            prediction.iterations_count
        );
        Ok(prediction)
    }

    fn describe(&self) -> String {
        format!("http ({})", self.config.url)
    }
}
