//! Scored grid points produced by the scan.

use geo::Coord;

/// A scored grid point.
///
/// Candidates only exist for grid points with at least one rated competitor
/// nearby, so `avg_rating` is always defined.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidatePoint {
    /// Grid latitude, rounded to six decimal places.
    pub latitude: f64,
    /// Grid longitude, rounded to six decimal places.
    pub longitude: f64,
    /// Competitors strictly within the search radius, rated or not.
    pub nearby_count: usize,
    /// Mean rating of the rated competitors within the radius.
    pub avg_rating: f64,
    /// Whether the point passes both the count ceiling and the rating floor.
    pub is_suggested: bool,
}

impl CandidatePoint {
    /// Grid point as a WGS84 coordinate (`x = longitude`, `y = latitude`).
    #[must_use]
    pub const fn location(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }
}
