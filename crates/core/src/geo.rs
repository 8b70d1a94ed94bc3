//! Geographic primitives.

use serde::{Deserialize, Serialize};
use crate::error::{NavError, Result};

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// A WGS84 point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting out-of-range or non-finite values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(NavError::InvalidCoordinate { latitude, longitude });
        }
        Ok(Self { latitude, longitude })
    }

    /// Great-circle distance to `other` in meters (haversine).
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        let phi1 = self.latitude.to_radians();
        let phi2 = other.latitude.to_radians();
        let d_phi = (other.latitude - self.latitude).to_radians();
        let d_lambda = (other.longitude - self.longitude).to_radians();

        let a = (d_phi / 2.0).sin().powi(2)
            + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().asin()
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6},{:.6}", self.latitude, self.longitude)
    }
}

/// Parses `"lat,lon"`.
impl std::str::FromStr for Coordinate {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| format!("expected LAT,LON, got '{}'", s))?;
        let lat: f64 = lat.trim().parse().map_err(|e| format!("bad latitude: {}", e))?;
        let lon: f64 = lon.trim().parse().map_err(|e| format!("bad longitude: {}", e))?;
        Coordinate::new(lat, lon).map_err(|e| e.to_string())
    }
}

/// Axis-aligned lat/lon rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// South-west corner
    pub min: Coordinate,

    /// North-east corner
    pub max: Coordinate,
}

impl BoundingBox {
    /// Smallest box containing every point, or `None` for no points.
    pub fn enclosing<'a>(points: impl IntoIterator<Item = &'a Coordinate>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = *iter.next()?;
        let mut bbox = BoundingBox { min: first, max: first };
        for p in iter {
            bbox.min.latitude = bbox.min.latitude.min(p.latitude);
            bbox.min.longitude = bbox.min.longitude.min(p.longitude);
            bbox.max.latitude = bbox.max.latitude.max(p.latitude);
            bbox.max.longitude = bbox.max.longitude.max(p.longitude);
        }
        Some(bbox)
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Coordinate {
        Coordinate {
            latitude: (self.min.latitude + self.max.latitude) / 2.0,
            longitude: (self.min.longitude + self.max.longitude) / 2.0,
        }
    }

    /// Whether `point` lies inside (edges included).
    pub fn contains(&self, point: &Coordinate) -> bool {
        (self.min.latitude..=self.max.latitude).contains(&point.latitude)
            && (self.min.longitude..=self.max.longitude).contains(&point.longitude)
    }
}

/// Insets applied when fitting a rectangle into the map viewport.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgePadding {
    /// Top inset
    pub top: f64,
    /// Left inset
    pub left: f64,
    /// Bottom inset
    pub bottom: f64,
    /// Right inset
    pub right: f64,
}

impl EdgePadding {
    /// Same inset on every side.
    pub fn uniform(inset: f64) -> Self {
        Self {
            top: inset,
            left: inset,
            bottom: inset,
            right: inset,
        }
    }
}

impl Default for EdgePadding {
    fn default() -> Self {
        Self::uniform(16.0)
    }
}
