//! Public API surface.
//!
//! Consolidates the serialisable types exchanged with clients. All types
//! derive Serialize/Deserialize for JSON serialization.

pub use crate::models::{
    CoastalSite, ConcentrationSample, DateRange, DriftSeries, DriftStep, FilterState, GeoBounds,
    GeoPoint, Intensity, SeriesOrigin, SiteFilter, Trajectory, TrajectoryPoint,
};
pub use crate::render::{DrawCommand, Placement, Style, Tooltip};
pub use crate::services::{AffectedSite, AnimationState, DerivedStatistics, RiskTier, SiteRisk};
pub use crate::source::{PredictedCoordinate, PredictionResponse};

use serde::{Deserialize, Serialize};

/// One rendered animation frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub state: AnimationState,
    pub commands: Vec<DrawCommand>,
}

/// Summary of a loaded series, without the step payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub origin: SeriesOrigin,
    pub iterations_count: u32,
    pub total_steps: usize,
    pub trajectories: Vec<Trajectory>,
    pub bounds: Option<GeoBounds>,
}

impl From<&DriftSeries> for SeriesSummary {
    fn from(series: &DriftSeries) -> Self {
        let positions: Vec<GeoPoint> = series.steps().iter().map(|s| s.position()).collect();
        Self {
            origin: series.origin,
            iterations_count: series.iterations_count,
            total_steps: series.len(),
            trajectories: series.trajectories(),
            bounds: GeoBounds::from_points(&positions),
        }
    }
}
