//! Great-circle distance metrics.

use std::fmt;
use std::str::FromStr;

use geo::{Coord, Distance, Geodesic, Haversine, Point};
use thiserror::Error;

/// Formula used to measure the distance between two WGS84 coordinates.
///
/// Both metrics are deterministic, so identical inputs always produce
/// identical distances.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use scout_core::DistanceMetric;
///
/// let zurich_hb = Coord { x: 8.5402, y: 47.3782 };
/// let bellevue = Coord { x: 8.5450, y: 47.3667 };
/// let metres = DistanceMetric::Geodesic.distance_meters(zurich_hb, bellevue);
/// assert!((1_200.0..1_400.0).contains(&metres));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum DistanceMetric {
    /// Geodesic distance on the WGS84 ellipsoid (Karney's algorithm).
    #[default]
    Geodesic,
    /// Haversine distance on a sphere with the mean Earth radius.
    Haversine,
}

impl DistanceMetric {
    /// Every supported metric, in documentation order.
    pub const ALL: [Self; 2] = [Self::Geodesic, Self::Haversine];

    /// Distance in metres between `origin` and `destination`.
    #[must_use]
    pub fn distance_meters(self, origin: Coord<f64>, destination: Coord<f64>) -> f64 {
        let from = Point::from(origin);
        let to = Point::from(destination);
        match self {
            Self::Geodesic => Geodesic.distance(from, to),
            Self::Haversine => Haversine.distance(from, to),
        }
    }

    /// Stable lowercase identifier used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Geodesic => "geodesic",
            Self::Haversine => "haversine",
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown metric name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown distance metric {input:?}; expected geodesic or haversine")]
pub struct ParseDistanceMetricError {
    /// Text that failed to parse.
    pub input: String,
}

impl FromStr for DistanceMetric {
    type Err = ParseDistanceMetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseDistanceMetricError { input: s.to_owned() })
    }
}
