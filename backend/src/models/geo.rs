use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the haversine formula.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Local flat-earth approximation: metres per degree of latitude.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// A WGS84 geographic coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees (-90.0 to 90.0)
    pub latitude: f64,
    /// Longitude in decimal degrees (-180.0 to 180.0)
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether the coordinate lies inside the valid latitude/longitude ranges.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Great-circle distance to another point in kilometres.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        distance_km(*self, *other)
    }

    /// Shift this point by a metric offset using the local metres-per-degree
    /// approximation (longitude scaled by `cos(latitude)`).
    pub fn offset_by_meters(&self, north_m: f64, east_m: f64) -> GeoPoint {
        let lat_scale = METERS_PER_DEGREE;
        let lon_scale = METERS_PER_DEGREE * self.latitude.to_radians().cos();
        GeoPoint {
            latitude: self.latitude + north_m / lat_scale,
            longitude: self.longitude + east_m / lon_scale,
        }
    }
}

/// Haversine distance between two coordinates in kilometres.
///
/// NaN inputs produce a NaN result.
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Axis-aligned latitude/longitude bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl GeoBounds {
    /// Smallest box containing every point, or `None` for an empty input.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a GeoPoint>,
    {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bounds = GeoBounds {
            south_west: first,
            north_east: first,
        };
        for p in iter {
            bounds.south_west.latitude = bounds.south_west.latitude.min(p.latitude);
            bounds.south_west.longitude = bounds.south_west.longitude.min(p.longitude);
            bounds.north_east.latitude = bounds.north_east.latitude.max(p.latitude);
            bounds.north_east.longitude = bounds.north_east.longitude.max(p.longitude);
        }
        Some(bounds)
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.south_west.latitude + self.north_east.latitude) / 2.0,
            (self.south_west.longitude + self.north_east.longitude) / 2.0,
        )
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.south_west.latitude..=self.north_east.latitude).contains(&point.latitude)
            && (self.south_west.longitude..=self.north_east.longitude).contains(&point.longitude)
    }
}
