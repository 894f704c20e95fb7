//! Thresholds that drive candidate classification.

use thiserror::Error;

use crate::DistanceMetric;

/// Search radius and acceptance thresholds for a scan.
///
/// A candidate is *suggested* when at most `max_nearby_competitors` lie
/// within `radius_meters` and their average rating is at least
/// `min_avg_rating`.
///
/// # Examples
///
/// ```
/// use scout_core::{DistanceMetric, SearchParams};
///
/// # fn main() -> Result<(), scout_core::InvalidParamsError> {
/// let params = SearchParams::new(400.0, 4.3, 1)?.with_metric(DistanceMetric::Haversine);
/// assert_eq!(params.max_nearby_competitors, 1);
/// assert_eq!(params.metric, DistanceMetric::Haversine);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchParams {
    /// Radius around each grid point, in metres. Must be positive.
    pub radius_meters: f64,
    /// Minimum acceptable average rating of nearby competitors.
    pub min_avg_rating: f64,
    /// Maximum acceptable number of nearby competitors.
    pub max_nearby_competitors: usize,
    /// Formula used to measure distances.
    #[cfg_attr(feature = "serde", serde(default))]
    pub metric: DistanceMetric,
}

/// Errors raised when [`SearchParams`] are malformed.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum InvalidParamsError {
    /// The radius was zero, negative or not finite.
    #[error("search radius must be a positive number of metres (got {radius_meters})")]
    NonPositiveRadius {
        /// Radius that failed validation.
        radius_meters: f64,
    },
    /// The rating threshold was NaN or infinite.
    #[error("minimum average rating must be finite (got {min_avg_rating})")]
    NonFiniteRating {
        /// Threshold that failed validation.
        min_avg_rating: f64,
    },
    /// The competitor ceiling was negative.
    #[error("maximum nearby competitors must not be negative (got {max_nearby_competitors})")]
    NegativeCompetitorCeiling {
        /// Ceiling that failed validation.
        max_nearby_competitors: i64,
    },
}

impl SearchParams {
    /// Validates and constructs [`SearchParams`] with the default metric.
    ///
    /// The competitor ceiling is accepted as a signed value so that negative
    /// configuration input is reported rather than wrapped.
    ///
    /// # Errors
    /// Returns [`InvalidParamsError`] when the radius is not positive, the
    /// rating threshold is not finite, or the ceiling is negative.
    pub fn new(
        radius_meters: f64,
        min_avg_rating: f64,
        max_nearby_competitors: i64,
    ) -> Result<Self, InvalidParamsError> {
        let ceiling = usize::try_from(max_nearby_competitors).map_err(|_| {
            InvalidParamsError::NegativeCompetitorCeiling {
                max_nearby_competitors,
            }
        })?;
        let params = Self {
            radius_meters,
            min_avg_rating,
            max_nearby_competitors: ceiling,
            metric: DistanceMetric::default(),
        };
        params.validate()?;
        Ok(params)
    }

    /// Replace the distance metric.
    #[must_use]
    pub const fn with_metric(mut self, metric: DistanceMetric) -> Self {
        self.metric = metric;
        self
    }

    /// Check the radius and rating threshold.
    ///
    /// # Errors
    /// Returns the first [`InvalidParamsError`] found.
    pub fn validate(&self) -> Result<(), InvalidParamsError> {
        if !(self.radius_meters.is_finite() && self.radius_meters > 0.0) {
            return Err(InvalidParamsError::NonPositiveRadius {
                radius_meters: self.radius_meters,
            });
        }
        if !self.min_avg_rating.is_finite() {
            return Err(InvalidParamsError::NonFiniteRating {
                min_avg_rating: self.min_avg_rating,
            });
        }
        Ok(())
    }

    /// Decide whether a neighbourhood passes both thresholds.
    #[must_use]
    pub fn accepts(&self, nearby_count: usize, avg_rating: f64) -> bool {
        nearby_count <= self.max_nearby_competitors && avg_rating >= self.min_avg_rating
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0)]
    #[case(-5.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn rejects_non_positive_radius(#[case] radius: f64) {
        let result = SearchParams::new(radius, 4.0, 1);
        assert!(matches!(
            result,
            Err(InvalidParamsError::NonPositiveRadius { .. })
        ));
    }

    #[rstest]
    fn rejects_negative_ceiling() {
        let result = SearchParams::new(400.0, 4.0, -1);
        assert_eq!(
            result,
            Err(InvalidParamsError::NegativeCompetitorCeiling {
                max_nearby_competitors: -1
            })
        );
    }

    #[rstest]
    fn rejects_nan_rating_threshold() {
        let result = SearchParams::new(400.0, f64::NAN, 1);
        assert!(matches!(
            result,
            Err(InvalidParamsError::NonFiniteRating { .. })
        ));
    }

    #[rstest]
    fn zero_ceiling_is_valid() {
        let params = SearchParams::new(400.0, 4.0, 0).expect("valid params");
        assert_eq!(params.max_nearby_competitors, 0);
        assert_eq!(params.metric, DistanceMetric::Geodesic);
    }

    #[rstest]
    #[case(1, 4.3, true)]
    #[case(0, 5.0, true)]
    #[case(2, 4.8, false)]
    #[case(1, 4.2, false)]
    fn accepts_only_sparse_well_rated_neighbourhoods(
        #[case] nearby: usize,
        #[case] rating: f64,
        #[case] expected: bool,
    ) {
        let params = SearchParams::new(400.0, 4.3, 1).expect("valid params");
        assert_eq!(params.accepts(nearby, rating), expected);
    }
}
