//! Data Transfer Objects for the HTTP API.
//!
//! Engine types are re-exported from [`crate::api`]; the types below only
//! exist at the HTTP boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::api::{
    AffectedSite, DerivedStatistics, DriftStep, Frame, GeoPoint, SeriesSummary,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Prediction source status ("connected", "disconnected" or "error: ...")
    pub source: String,
    pub source_kind: String,
}

/// Full prediction payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionDto {
    #[serde(flatten)]
    pub summary: SeriesSummary,
    pub steps: Vec<DriftStep>,
    pub loaded_at: DateTime<Utc>,
}

/// Query for `POST /v1/prediction/reload`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReloadQuery {
    /// Report provider failures instead of serving the fallback series
    #[serde(default)]
    pub strict: bool,
}

/// Query for `GET /v1/prediction/frames/{step}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FrameQuery {
    /// Location tag to keep; empty or absent means all sites
    pub site: Option<String>,
    /// Registered site slug whose vicinity box to keep
    pub near: Option<String>,
    /// Particle RNG seed for a reproducible frame
    pub seed: Option<u64>,
}

/// Query for `GET /v1/impact`.
#[derive(Debug, Clone, Deserialize)]
pub struct ImpactQuery {
    pub lat: f64,
    pub lon: f64,
    pub radius_km: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImpactResponse {
    pub center: GeoPoint,
    pub radius_km: f64,
    pub open_ocean: bool,
    pub affected_sites: Vec<AffectedSite>,
}
