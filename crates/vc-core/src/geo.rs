//! # Geospatial Helpers — Distance and Geofencing
//!
//! Great-circle distance between two coordinates using the haversine
//! formula on a spherical Earth of radius [`EARTH_RADIUS_KM`], and
//! circular geofence containment built on that distance.
//!
//! Inputs are degrees; all trigonometry runs in radians. Antimeridian
//! crossings need no special handling because only the angular
//! difference in longitude enters the formula.
//!
//! Distances are reported to one decimal place (100 m resolution).
//! Geofence checks compare that rounded distance against the radius, so a
//! point 1049 m away is inside a 1 km fence.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ValidationError};

/// Mean Earth radius used by the haversine formula, in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates, in km, rounded to 0.1 km.
pub fn distance_in_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` past 1 for near-antipodal points. Not f64::min,
    // which would turn a NaN coordinate into the antipodal distance.
    let a = if a > 1.0 { 1.0 } else { a };
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    (EARTH_RADIUS_KM * c * 10.0).round() / 10.0
}

/// Whether two coordinates lie within `radius_meters` of each other.
///
/// The boundary is inclusive and the check is symmetric in the two points.
pub fn is_within_geofence(lat1: f64, lon1: f64, lat2: f64, lon2: f64, radius_meters: f64) -> bool {
    let distance_m = distance_in_km(lat1, lon1, lat2, lon2) * 1000.0;
    distance_m <= radius_meters
}

/// A validated latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoPoint")]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

#[derive(Deserialize)]
struct RawGeoPoint {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawGeoPoint> for GeoPoint {
    type Error = ValidationError;

    fn try_from(raw: RawGeoPoint) -> Result<Self, Self::Error> {
        Self::new(raw.latitude, raw.longitude)
    }
}

impl GeoPoint {
    /// Build a point, rejecting non-finite or out-of-range coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if latitude is outside -90..=90 or
    /// longitude is outside -180..=180.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        let latitude = ensure_finite("latitude", latitude)?;
        let longitude = ensure_finite("longitude", longitude)?;
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ValidationError::OutOfRange {
                field: "latitude",
                value: latitude,
                expected: "between -90 and 90",
            });
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::OutOfRange {
                field: "longitude",
                value: longitude,
                expected: "between -180 and 180",
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Distance to `other` in km, rounded to 0.1 km.
    pub fn distance_km(&self, other: &GeoPoint) -> f64 {
        distance_in_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl std::str::FromStr for GeoPoint {
    type Err = ValidationError;

    /// Parse `"lat,lon"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || ValidationError::InvalidCoordinate(s.to_string());
        let (lat, lon) = s.split_once(',').ok_or_else(malformed)?;
        let lat: f64 = lat.trim().parse().map_err(|_| malformed())?;
        let lon: f64 = lon.trim().parse().map_err(|_| malformed())?;
        Self::new(lat, lon)
    }
}

/// A circular fence around a centre point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Geofence {
    center: GeoPoint,
    radius_meters: f64,
}

impl Geofence {
    /// Build a fence, rejecting a negative or non-finite radius.
    pub fn new(center: GeoPoint, radius_meters: f64) -> Result<Self, ValidationError> {
        let radius_meters = ensure_finite("radius_meters", radius_meters)?;
        if radius_meters < 0.0 {
            return Err(ValidationError::OutOfRange {
                field: "radius_meters",
                value: radius_meters,
                expected: "at least 0",
            });
        }
        Ok(Self {
            center,
            radius_meters,
        })
    }

    /// The fence centre.
    pub fn center(&self) -> GeoPoint {
        self.center
    }

    /// The fence radius in metres.
    pub fn radius_meters(&self) -> f64 {
        self.radius_meters
    }

    /// Whether `point` lies inside the fence, boundary included.
    pub fn contains(&self, point: &GeoPoint) -> bool {
        let inside = is_within_geofence(
            self.center.latitude,
            self.center.longitude,
            point.latitude,
            point.longitude,
            self.radius_meters,
        );
        tracing::trace!(
            center = %self.center,
            point = %point,
            radius_m = self.radius_meters,
            inside,
            "geofence check"
        );
        inside
    }
}
