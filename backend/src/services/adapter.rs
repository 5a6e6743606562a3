//! Data-shape adapter.
//!
//! Turns the provider payload into chronologically ordered drift records.
//! The provider lists the arrival point first, so the coordinate list is
//! reversed: index 0 becomes the open-ocean start, the last index the coast.

use crate::models::{
    ConcentrationSample, DriftSeries, Intensity, SeriesOrigin, Trajectory, TrajectoryPoint,
};
use crate::source::{PredictedCoordinate, PredictionResponse, SourceResult};

/// Site tag of every step derived from a live prediction.
pub const PREDICTION_TAG: &str = "sargassum-prediction";

/// Site tag of the canned series used when the provider fails.
pub const FALLBACK_TAG: &str = "progreso-fallback";

// (lat, lon, area km², density, intensity) off the Progreso coast
const FALLBACK_POINTS: [(f64, f64, f64, u8, Intensity); 5] = [
    (21.544, -89.386, 500.0, 30, Intensity::Low),
    (21.537, -89.305, 800.0, 45, Intensity::Medium),
    (21.552, -89.236, 1200.0, 60, Intensity::Medium),
    (21.576, -89.164, 1800.0, 75, Intensity::High),
    (21.603, -89.097, 2500.0, 90, Intensity::High),
];

/// Visual density and intensity for a biomass area in km².
///
/// | area   | density | intensity |
/// |--------|---------|-----------|
/// | 0      | 0       | low       |
/// | < 15   | 30      | low       |
/// | < 25   | 50      | low       |
/// | < 30   | 65      | medium    |
/// | < 35   | 80      | medium    |
/// | ≥ 35   | 95      | high      |
pub fn density_for_area(area_km2: f64) -> (u8, Intensity) {
    if area_km2 <= 0.0 {
        (0, Intensity::Low)
    } else if area_km2 < 15.0 {
        (30, Intensity::Low)
    } else if area_km2 < 25.0 {
        (50, Intensity::Low)
    } else if area_km2 < 30.0 {
        (65, Intensity::Medium)
    } else if area_km2 < 35.0 {
        (80, Intensity::Medium)
    } else {
        (95, Intensity::High)
    }
}

/// Null, negative and non-finite areas all count as "no biomass".
fn normalized_area(coord: &PredictedCoordinate) -> f64 {
    match coord.biomass_area {
        Some(area) if area.is_finite() && area > 0.0 => area,
        _ => 0.0,
    }
}

/// Coordinates in chronological order, dropping points outside the valid
/// lat/lon range.
fn chronological(response: &PredictionResponse) -> Vec<&PredictedCoordinate> {
    let ordered: Vec<&PredictedCoordinate> = response
        .predicted_coordinates
        .iter()
        .rev()
        .filter(|c| {
            let valid = c.position().is_valid();
            if !valid {
                log::warn!(
                    "Dropping out-of-range coordinate ({}, {})",
                    c.latitude,
                    c.longitude
                );
            }
            valid
        })
        .collect();

    if let (Some(first), Some(last)) = (ordered.first(), ordered.last()) {
        log::debug!(
            "Reversed {} coordinates: start ({}, {}), arrival ({}, {})",
            ordered.len(),
            first.latitude,
            first.longitude,
            last.latitude,
            last.longitude
        );
    }
    ordered
}

/// One trajectory tagged [`PREDICTION_TAG`], earliest point first.
pub fn trajectories_from_response(response: &PredictionResponse) -> Vec<Trajectory> {
    let points: Vec<TrajectoryPoint> = chronological(response)
        .into_iter()
        .map(|c| TrajectoryPoint::new(c.latitude, c.longitude, PREDICTION_TAG))
        .collect();

    vec![Trajectory {
        location: PREDICTION_TAG.to_string(),
        points,
    }]
}

/// Samples index-aligned with [`trajectories_from_response`].
pub fn concentrations_from_response(response: &PredictionResponse) -> Vec<ConcentrationSample> {
    chronological(response)
        .into_iter()
        .map(|c| {
            let area_km2 = normalized_area(c);
            let (density, intensity) = density_for_area(area_km2);
            ConcentrationSample {
                latitude: c.latitude,
                longitude: c.longitude,
                area_km2,
                density,
                intensity,
                location: PREDICTION_TAG.to_string(),
            }
        })
        .collect()
}

pub fn fallback_trajectories() -> Vec<Trajectory> {
    vec![Trajectory {
        location: FALLBACK_TAG.to_string(),
        points: FALLBACK_POINTS
            .iter()
            .map(|&(lat, lon, ..)| TrajectoryPoint::new(lat, lon, FALLBACK_TAG))
            .collect(),
    }]
}

pub fn fallback_concentrations() -> Vec<ConcentrationSample> {
    FALLBACK_POINTS
        .iter()
        .map(|&(latitude, longitude, area_km2, density, intensity)| ConcentrationSample {
            latitude,
            longitude,
            area_km2,
            density,
            intensity,
            location: FALLBACK_TAG.to_string(),
        })
        .collect()
}

pub fn fallback_series() -> DriftSeries {
    DriftSeries::from_parts(
        SeriesOrigin::Fallback,
        0,
        fallback_trajectories(),
        fallback_concentrations(),
    )
}

/// Build the drift series from a fetch result.
///
/// Provider failures never propagate: they are logged and replaced by the
/// fallback series. Trajectories are derived before samples, both from the
/// same payload.
pub fn adapt(result: SourceResult<PredictionResponse>) -> DriftSeries {
    match result {
        Ok(response) => {
            let trajectories = trajectories_from_response(&response);
            let samples = concentrations_from_response(&response);
            let series = DriftSeries::from_parts(
                SeriesOrigin::Live,
                response.iterations_count,
                trajectories,
                samples,
            );
            log::info!(
                "Adapted prediction: {} steps from {} iterations",
                series.len(),
                series.iterations_count
            );
            series
        }
        Err(e) => {
            log::warn!("Prediction source failed, using fallback series: {}", e);
            fallback_series()
        }
    }
}
