//! Proximity/impact engine.

use serde::{Deserialize, Serialize};

use crate::models::{distance_km, CoastalRegistry, CoastalSite, GeoPoint};

/// Impact radius multiplier applied to a sample's spread radius.
pub const IMPACT_RADIUS_FACTOR: f64 = 10.0;

/// A registered site inside an impact zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectedSite {
    pub site: CoastalSite,
    pub distance_km: f64,
}

/// Sites within `radius_km` of `center`, nearest first.
///
/// An empty result means the arrival point is in open ocean.
pub fn affected_sites(
    registry: &CoastalRegistry,
    center: GeoPoint,
    radius_km: f64,
) -> Vec<AffectedSite> {
    let mut affected: Vec<AffectedSite> = registry
        .sites()
        .iter()
        .filter_map(|site| {
            let d = distance_km(center, site.position());
            (d <= radius_km).then(|| AffectedSite {
                site: site.clone(),
                distance_km: d,
            })
        })
        .collect();

    affected.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));

    log::debug!(
        "Impact zone at ({:.4}, {:.4}) r={:.1} km: {} site(s) affected",
        center.latitude,
        center.longitude,
        radius_km,
        affected.len()
    );
    affected
}
