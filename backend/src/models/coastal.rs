//! Coastal site registry.
//!
//! Static reference data for the monitored beaches of the Yucatán peninsula.
//! The registry is built once and shared read-only for the process lifetime.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};

use super::geo::GeoPoint;

/// Default box half-width (degrees) used by the vicinity filter.
pub const DEFAULT_VICINITY_RADIUS_DEG: f64 = 0.3;

/// A named coastal location that can be threatened by an arrival.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoastalSite {
    /// Display name
    pub name: String,
    /// State / region the site belongs to
    pub region: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Stable identifier used by filter selections (e.g. "playa-del-carmen")
    pub slug: String,
    /// Half-width of the lat/lon box used by the vicinity filter
    pub vicinity_radius_deg: f64,
}

impl CoastalSite {
    pub fn new(
        name: impl Into<String>,
        region: impl Into<String>,
        latitude: f64,
        longitude: f64,
        slug: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
            latitude,
            longitude,
            slug: slug.into(),
            vicinity_radius_deg: DEFAULT_VICINITY_RADIUS_DEG,
        }
    }

    pub fn with_vicinity_radius(mut self, radius_deg: f64) -> Self {
        self.vicinity_radius_deg = radius_deg;
        self
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// "Name, Region" label used in tooltips.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.name, self.region)
    }
}

// (name, region, lat, lon, slug, vicinity radius)
const YUCATAN_COAST: &[(&str, &str, f64, f64, &str, f64)] = &[
    ("Progreso", "Yucatán", 21.2817, -89.6650, "progreso", 0.3),
    ("Telchac Puerto", "Yucatán", 21.3383, -89.2667, "telchac", 0.3),
    ("Dzilam de Bravo", "Yucatán", 21.3833, -88.9000, "dzilam", 0.3),
    ("San Felipe", "Yucatán", 21.5667, -88.2500, "san-felipe", 0.3),
    ("Río Lagartos", "Yucatán", 21.6000, -88.1500, "rio-lagartos", 0.3),
    ("Las Coloradas", "Yucatán", 21.5667, -87.9667, "las-coloradas", 0.3),
    ("Holbox", "Quintana Roo", 21.5211, -87.3764, "holbox", 0.3),
    ("Chiquilá", "Quintana Roo", 21.4250, -87.3333, "chiquila", 0.3),
    ("Cancún", "Quintana Roo", 21.1619, -86.8515, "cancun", 0.4),
    ("Puerto Morelos", "Quintana Roo", 20.8508, -86.8739, "puerto-morelos", 0.3),
    ("Playa del Carmen", "Quintana Roo", 20.6296, -87.0739, "playa-del-carmen", 0.3),
    ("Puerto Aventuras", "Quintana Roo", 20.5000, -87.2333, "puerto-aventuras", 0.3),
    ("Akumal", "Quintana Roo", 20.3953, -87.3153, "akumal", 0.3),
    ("Tulum", "Quintana Roo", 20.2114, -87.4654, "tulum", 0.4),
    ("Sian Ka'an", "Quintana Roo", 19.8667, -87.5333, "sian-kaan", 0.3),
    ("Mahahual", "Quintana Roo", 18.7097, -87.7089, "mahahual", 0.3),
    ("Xcalak", "Quintana Roo", 18.2667, -87.8333, "xcalak", 0.3),
    ("Chetumal", "Quintana Roo", 18.5001, -88.2962, "chetumal", 0.3),
];

/// Read-only collection of monitored coastal sites.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoastalRegistry {
    sites: Vec<CoastalSite>,
}

impl CoastalRegistry {
    pub fn new(sites: Vec<CoastalSite>) -> Self {
        Self { sites }
    }

    /// The 18 monitored beaches of Yucatán and Quintana Roo.
    pub fn yucatan_peninsula() -> Self {
        let sites = YUCATAN_COAST
            .iter()
            .map(|&(name, region, lat, lon, slug, radius)| {
                CoastalSite::new(name, region, lat, lon, slug).with_vicinity_radius(radius)
            })
            .collect();
        Self { sites }
    }

    /// Process-wide shared instance of [`CoastalRegistry::yucatan_peninsula`].
    pub fn shared() -> Arc<CoastalRegistry> {
        static REGISTRY: OnceLock<Arc<CoastalRegistry>> = OnceLock::new();
        Arc::clone(REGISTRY.get_or_init(|| Arc::new(Self::yucatan_peninsula())))
    }

    pub fn sites(&self) -> &[CoastalSite] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&CoastalSite> {
        self.sites.iter().find(|s| s.slug.eq_ignore_ascii_case(slug))
    }
}
