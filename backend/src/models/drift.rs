//! Drift records produced by the data-shape adapter.
//!
//! The upstream payload yields two parallel sequences (trajectory points and
//! concentration samples). They are fused here into a single [`DriftStep`]
//! per index so that filtering can never let the two drift out of alignment.

use serde::{Deserialize, Serialize};

use super::filter::SiteFilter;
use super::geo::GeoPoint;

/// Qualitative concentration level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl Intensity {
    /// Human readable label used in tooltips.
    pub fn label(&self) -> &'static str {
        match self {
            Intensity::Low => "Low",
            Intensity::Medium => "Medium",
            Intensity::High => "High",
        }
    }
}

/// A single point of a predicted drift path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Site tag the point belongs to
    pub location: String,
}

impl TrajectoryPoint {
    pub fn new(latitude: f64, longitude: f64, location: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            location: location.into(),
        }
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// A trajectory point annotated with a biomass-area measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcentrationSample {
    pub latitude: f64,
    pub longitude: f64,
    /// Floating biomass area in square kilometres (null upstream is stored as 0)
    pub area_km2: f64,
    /// Visual density, 0-100
    pub density: u8,
    pub intensity: Intensity,
    pub location: String,
}

impl ConcentrationSample {
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Samples without biomass are not drawn.
    pub fn has_biomass(&self) -> bool {
        self.area_km2 > 0.0
    }
}

/// Ordered drift path for one site tag. Index 0 is the earliest point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub location: String,
    pub points: Vec<TrajectoryPoint>,
}

impl Trajectory {
    pub fn positions(&self) -> Vec<GeoPoint> {
        self.points.iter().map(TrajectoryPoint::position).collect()
    }
}

/// Combined per-step record: the trajectory point and its sample at the same index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftStep {
    /// Position of this step in the full (unfiltered) series
    pub index: usize,
    pub point: TrajectoryPoint,
    pub sample: ConcentrationSample,
}

impl DriftStep {
    pub fn location(&self) -> &str {
        &self.point.location
    }

    pub fn position(&self) -> GeoPoint {
        self.point.position()
    }
}

/// Where a series came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesOrigin {
    /// Derived from a successful provider response
    Live,
    /// Substituted after a provider failure
    Fallback,
}

/// The full, chronologically ordered drift prediction held by a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftSeries {
    pub origin: SeriesOrigin,
    /// Iteration count reported by the provider (0 for fallback data)
    pub iterations_count: u32,
    steps: Vec<DriftStep>,
}

impl DriftSeries {
    /// Fuse trajectories and samples into index-aligned steps.
    ///
    /// Trajectory points are concatenated in trajectory order. When the two
    /// sequences disagree in length the surplus tail of the longer one is dropped.
    pub fn from_parts(
        origin: SeriesOrigin,
        iterations_count: u32,
        trajectories: Vec<Trajectory>,
        samples: Vec<ConcentrationSample>,
    ) -> Self {
        let points: Vec<TrajectoryPoint> = trajectories
            .into_iter()
            .flat_map(|t| t.points.into_iter())
            .collect();

        if points.len() != samples.len() {
            log::warn!(
                "Trajectory has {} points but {} concentration samples; truncating to the shorter",
                points.len(),
                samples.len()
            );
        }

        let steps = points
            .into_iter()
            .zip(samples)
            .enumerate()
            .map(|(index, (point, sample))| DriftStep {
                index,
                point,
                sample,
            })
            .collect();

        Self {
            origin,
            iterations_count,
            steps,
        }
    }

    pub fn empty() -> Self {
        Self {
            origin: SeriesOrigin::Live,
            iterations_count: 0,
            steps: Vec::new(),
        }
    }

    pub fn steps(&self) -> &[DriftStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The arrival point: last step of the full series.
    pub fn terminal(&self) -> Option<&DriftStep> {
        self.steps.last()
    }

    pub fn samples(&self) -> impl Iterator<Item = &ConcentrationSample> {
        self.steps.iter().map(|s| &s.sample)
    }

    /// Steps that pass the filter, in series order.
    pub fn filtered(&self, filter: &SiteFilter) -> Vec<&DriftStep> {
        self.steps.iter().filter(|s| filter.matches(s)).collect()
    }

    /// All trajectories of the series, one per site tag.
    pub fn trajectories(&self) -> Vec<Trajectory> {
        let all: Vec<&DriftStep> = self.steps.iter().collect();
        split_trajectories(&all)
    }
}

/// Re-split a list of combined steps into per-tag trajectories.
///
/// Tags appear in the order of their first step; points keep series order.
pub fn split_trajectories(steps: &[&DriftStep]) -> Vec<Trajectory> {
    let mut trajectories: Vec<Trajectory> = Vec::new();
    for step in steps {
        match trajectories
            .iter_mut()
            .find(|t| t.location == step.point.location)
        {
            Some(trajectory) => trajectory.points.push(step.point.clone()),
            None => trajectories.push(Trajectory {
                location: step.point.location.clone(),
                points: vec![step.point.clone()],
            }),
        }
    }
    trajectories
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(lat: f64, lon: f64, area: f64, tag: &str) -> ConcentrationSample {
        ConcentrationSample {
            latitude: lat,
            longitude: lon,
            area_km2: area,
            density: 30,
            intensity: Intensity::Low,
            location: tag.to_string(),
        }
    }

    fn trajectory(tag: &str, coords: &[(f64, f64)]) -> Trajectory {
        Trajectory {
            location: tag.to_string(),
            points: coords
                .iter()
                .map(|&(lat, lon)| TrajectoryPoint::new(lat, lon, tag))
                .collect(),
        }
    }

    #[test]
    fn test_from_parts_aligns_indices() {
        let series = DriftSeries::from_parts(
            SeriesOrigin::Live,
            3,
            vec![trajectory("a", &[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)])],
            vec![
                sample(1.0, 1.0, 10.0, "a"),
                sample(2.0, 2.0, 20.0, "a"),
                sample(3.0, 3.0, 30.0, "a"),
            ],
        );

        assert_eq!(series.len(), 3);
        for (i, step) in series.steps().iter().enumerate() {
            assert_eq!(step.index, i);
            assert_eq!(step.point.latitude, step.sample.latitude);
        }
        assert_eq!(series.terminal().unwrap().sample.area_km2, 30.0);
    }

    #[test]
    fn test_from_parts_truncates_mismatch() {
        let series = DriftSeries::from_parts(
            SeriesOrigin::Live,
            0,
            vec![trajectory("a", &[(1.0, 1.0), (2.0, 2.0)])],
            vec![sample(1.0, 1.0, 10.0, "a")],
        );
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_split_trajectories_groups_by_tag() {
        let series = DriftSeries::from_parts(
            SeriesOrigin::Live,
            0,
            vec![
                trajectory("a", &[(1.0, 1.0), (2.0, 2.0)]),
                trajectory("b", &[(5.0, 5.0)]),
            ],
            vec![
                sample(1.0, 1.0, 1.0, "a"),
                sample(2.0, 2.0, 1.0, "a"),
                sample(5.0, 5.0, 1.0, "b"),
            ],
        );

        let trajectories = series.trajectories();
        assert_eq!(trajectories.len(), 2);
        assert_eq!(trajectories[0].location, "a");
        assert_eq!(trajectories[0].points.len(), 2);
        assert_eq!(trajectories[1].location, "b");
    }

    #[test]
    fn test_empty_series() {
        let series = DriftSeries::empty();
        assert!(series.is_empty());
        assert!(series.terminal().is_none());
        assert!(series.trajectories().is_empty());
    }

    #[test]
    fn test_intensity_serializes_lowercase() {
        let json = serde_json::to_string(&Intensity::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }
}
