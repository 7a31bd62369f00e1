//! Geographic coordinate parsing and bounding-box helpers.
//!
//! Used by the location search endpoint, which receives a `"lat,lon"` path
//! segment and searches an inclusive box centred on it.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Half-side of the search box, in degrees, when the caller gives no radius.
pub const DEFAULT_SEARCH_RADIUS_DEGREES: f64 = 0.5;

/// A latitude/longitude pair. Ranges are not validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// Why a coordinate string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinateParseError {
    #[error("expected '<lat>,<lon>' but found no comma in '{0}'")]
    MissingSeparator(String),

    #[error("invalid latitude '{0}'")]
    InvalidLatitude(String),

    #[error("invalid longitude '{0}'")]
    InvalidLongitude(String),
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateParseError;

    /// Split on the first comma only. Anything after it belongs to the
    /// longitude, so `"1,2,3"` fails on the longitude part.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut parts = input.splitn(2, ',');
        let lat = parts.next().unwrap_or_default();
        let lon = parts
            .next()
            .ok_or_else(|| CoordinateParseError::MissingSeparator(input.to_string()))?;

        let latitude = parse_component(lat)
            .ok_or_else(|| CoordinateParseError::InvalidLatitude(lat.to_string()))?;
        let longitude = parse_component(lon)
            .ok_or_else(|| CoordinateParseError::InvalidLongitude(lon.to_string()))?;

        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

fn parse_component(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Inclusive latitude/longitude box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_latitude: f64,
    pub max_latitude: f64,
    pub min_longitude: f64,
    pub max_longitude: f64,
}

impl BoundingBox {
    /// Box spanning two arbitrary corners, in either order.
    pub fn from_corners(a: Coordinate, b: Coordinate) -> Self {
        Self {
            min_latitude: a.latitude.min(b.latitude),
            max_latitude: a.latitude.max(b.latitude),
            min_longitude: a.longitude.min(b.longitude),
            max_longitude: a.longitude.max(b.longitude),
        }
    }

    /// Square box of half-side `radius` degrees around `center`.
    ///
    /// `radius` must be finite and non-negative.
    pub fn around(center: Coordinate, radius: f64) -> Result<Self, CoreError> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(CoreError::Validation(format!(
                "radius must be a non-negative number of degrees, got {radius}"
            )));
        }

        Ok(Self::from_corners(
            Coordinate::new(center.latitude - radius, center.longitude - radius),
            Coordinate::new(center.latitude + radius, center.longitude + radius),
        ))
    }

    pub fn contains(&self, point: &Coordinate) -> bool {
        (self.min_latitude..=self.max_latitude).contains(&point.latitude)
            && (self.min_longitude..=self.max_longitude).contains(&point.longitude)
    }
}
