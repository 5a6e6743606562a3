//! Wire types of the prediction provider.

use serde::{Deserialize, Serialize};

use crate::models::GeoPoint;

/// One predicted coordinate as sent by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictedCoordinate {
    pub latitude: f64,
    pub longitude: f64,
    /// Floating biomass area in km², absent or null when unknown
    #[serde(rename = "sargassumBiomass", alias = "biomassArea", default)]
    pub biomass_area: Option<f64>,
}

impl PredictedCoordinate {
    pub fn new(latitude: f64, longitude: f64, biomass_area: Option<f64>) -> Self {
        Self {
            latitude,
            longitude,
            biomass_area,
        }
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Full response of the prediction endpoint, in upstream order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResponse {
    #[serde(default)]
    pub predicted_coordinates: Vec<PredictedCoordinate>,
    #[serde(default)]
    pub iterations_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_provider_payload() {
        let json = r#"{
            "predictedCoordinates": [
                {"latitude": 21.1, "longitude": -86.9, "sargassumBiomass": 31.5},
                {"latitude": 20.9, "longitude": -86.5, "sargassumBiomass": null}
            ],
            "iterationsCount": 15
        }"#;
        let response: PredictionResponse = serde_json::from_str(json).unwrap();

        assert_eq!(response.iterations_count, 15);
        assert_eq!(response.predicted_coordinates.len(), 2);
        assert_eq!(response.predicted_coordinates[0].biomass_area, Some(31.5));
        assert_eq!(response.predicted_coordinates[1].biomass_area, None);
    }

    #[test]
    fn test_deserialize_biomass_area_alias_and_missing_field() {
        let json = r#"{
            "predictedCoordinates": [
                {"latitude": 21.1, "longitude": -86.9, "biomassArea": 12.0},
                {"latitude": 20.9, "longitude": -86.5}
            ],
            "iterationsCount": 2
        }"#;
        let response: PredictionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.predicted_coordinates[0].biomass_area, Some(12.0));
        assert_eq!(response.predicted_coordinates[1].biomass_area, None);
    }
}
