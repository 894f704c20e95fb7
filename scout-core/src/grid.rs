//! Regular latitude/longitude grids and their enumeration.
//!
//! Grid values are produced from an integer index (`min + i * step`) and
//! rounded to six decimal places, so enumeration never accumulates
//! floating-point drift and is reproducible for identical inputs.

use geo::Coord;
use thiserror::Error;

/// Decimal places kept on every enumerated coordinate.
const COORDINATE_DECIMALS: i32 = 6;

/// Smallest step that survives rounding without repeating coordinates.
const MIN_STEP: f64 = 0.000_001;

/// Round a coordinate to six decimal places.
///
/// # Examples
///
/// ```
/// use scout_core::round_coordinate;
///
/// assert_eq!(round_coordinate(47.340_000_000_1), 47.34);
/// assert_eq!(round_coordinate(8.123_456_7), 8.123_457);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "rounding scales by a power of ten and back"
)]
pub fn round_coordinate(value: f64) -> f64 {
    let scale = 10_f64.powi(COORDINATE_DECIMALS);
    (value * scale).round() / scale
}

/// Bounding box and step of the candidate grid.
///
/// Fields are public so callers can build a grid from configuration; use
/// [`GridSpec::new`] or [`GridSpec::validate`] before enumerating.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use scout_core::GridSpec;
///
/// # fn main() -> Result<(), scout_core::InvalidGridError> {
/// let grid = GridSpec::new(0.0, 1.0, 0.0, 1.0, 0.5)?;
/// let points: Vec<Coord<f64>> = grid.points()?.collect();
/// assert_eq!(
///     points,
///     vec![
///         Coord { x: 0.0, y: 0.0 },
///         Coord { x: 0.5, y: 0.0 },
///         Coord { x: 0.0, y: 0.5 },
///         Coord { x: 0.5, y: 0.5 },
///     ]
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSpec {
    /// Southern edge (inclusive), decimal degrees.
    pub lat_min: f64,
    /// Northern edge (exclusive), decimal degrees.
    pub lat_max: f64,
    /// Western edge (inclusive), decimal degrees.
    pub lon_min: f64,
    /// Eastern edge (exclusive), decimal degrees.
    pub lon_max: f64,
    /// Spacing between neighbouring grid points, decimal degrees.
    pub step: f64,
}

/// Errors raised when a [`GridSpec`] cannot be enumerated.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum InvalidGridError {
    /// A bound or the step was NaN or infinite.
    #[error("grid {field} must be finite (got {value})")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// Value that failed validation.
        value: f64,
    },
    /// A bound fell outside the WGS84 coordinate range.
    #[error("grid {field} {value} is outside the valid coordinate range")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Value that failed validation.
        value: f64,
    },
    /// The step was zero or negative.
    #[error("grid step must be positive (got {step})")]
    NonPositiveStep {
        /// Step that failed validation.
        step: f64,
    },
    /// The step was finer than the six-decimal coordinate precision.
    #[error("grid step {step} is finer than the 0.000001 degree coordinate precision")]
    StepBelowPrecision {
        /// Step that failed validation.
        step: f64,
    },
    /// The minimum bound was not below the maximum bound.
    #[error("grid {axis} bounds are inverted: min {min} must be below max {max}")]
    InvertedBounds {
        /// Axis name, `latitude` or `longitude`.
        axis: &'static str,
        /// Lower bound supplied.
        min: f64,
        /// Upper bound supplied.
        max: f64,
    },
    /// The step was wider than the span of an axis.
    #[error("grid step {step} exceeds the {axis} span of {span}")]
    StepExceedsSpan {
        /// Axis name, `latitude` or `longitude`.
        axis: &'static str,
        /// Width of the axis.
        span: f64,
        /// Step that failed validation.
        step: f64,
    },
    /// The grid would enumerate more than [`GridSpec::MAX_POINTS`] points.
    #[error("grid would contain roughly {estimate} points; the limit is {limit}")]
    TooManyPoints {
        /// Estimated number of grid points.
        estimate: f64,
        /// Maximum supported number of grid points.
        limit: usize,
    },
}

impl GridSpec {
    /// Upper bound on the number of enumerated points.
    pub const MAX_POINTS: usize = 4_000_000;

    /// Validates and constructs a [`GridSpec`].
    ///
    /// # Errors
    /// Returns [`InvalidGridError`] when the bounds are inverted, the step is
    /// not positive, or the grid would be empty or unbounded.
    pub fn new(
        lat_min: f64,
        lat_max: f64,
        lon_min: f64,
        lon_max: f64,
        step: f64,
    ) -> Result<Self, InvalidGridError> {
        let grid = Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
            step,
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Check that the grid yields a finite, non-empty set of points.
    ///
    /// # Errors
    /// Returns the first [`InvalidGridError`] found.
    #[expect(
        clippy::float_arithmetic,
        reason = "span and point estimates divide degree ranges by the step"
    )]
    pub fn validate(&self) -> Result<(), InvalidGridError> {
        for (field, value) in [
            ("lat_min", self.lat_min),
            ("lat_max", self.lat_max),
            ("lon_min", self.lon_min),
            ("lon_max", self.lon_max),
            ("step", self.step),
        ] {
            if !value.is_finite() {
                return Err(InvalidGridError::NonFinite { field, value });
            }
        }
        for (field, value, limit) in [
            ("lat_min", self.lat_min, 90.0),
            ("lat_max", self.lat_max, 90.0),
            ("lon_min", self.lon_min, 180.0),
            ("lon_max", self.lon_max, 180.0),
        ] {
            if value.abs() > limit {
                return Err(InvalidGridError::OutOfRange { field, value });
            }
        }
        if self.step <= 0.0 {
            return Err(InvalidGridError::NonPositiveStep { step: self.step });
        }
        if self.step < MIN_STEP {
            return Err(InvalidGridError::StepBelowPrecision { step: self.step });
        }

        let mut estimate = 1.0_f64;
        for (axis, min, max) in [
            ("latitude", self.lat_min, self.lat_max),
            ("longitude", self.lon_min, self.lon_max),
        ] {
            if min >= max {
                return Err(InvalidGridError::InvertedBounds { axis, min, max });
            }
            let span = max - min;
            let steps = span / self.step;
            if steps < 1.0 {
                return Err(InvalidGridError::StepExceedsSpan {
                    axis,
                    span,
                    step: self.step,
                });
            }
            estimate *= steps.ceil();
        }

        #[expect(
            clippy::cast_precision_loss,
            reason = "the limit is far below 2^52 and converts exactly"
        )]
        let limit = Self::MAX_POINTS as f64;
        if estimate > limit {
            return Err(InvalidGridError::TooManyPoints {
                estimate,
                limit: Self::MAX_POINTS,
            });
        }
        Ok(())
    }

    /// Latitude axis (rows) of the grid.
    ///
    /// # Errors
    /// Returns [`InvalidGridError`] when the grid is invalid.
    pub fn latitudes(&self) -> Result<GridAxis, InvalidGridError> {
        self.validate()?;
        Ok(GridAxis::new(self.lat_min, self.lat_max, self.step))
    }

    /// Longitude axis (columns) of the grid.
    ///
    /// # Errors
    /// Returns [`InvalidGridError`] when the grid is invalid.
    pub fn longitudes(&self) -> Result<GridAxis, InvalidGridError> {
        self.validate()?;
        Ok(GridAxis::new(self.lon_min, self.lon_max, self.step))
    }

    /// Enumerate grid points latitude-major, then longitude.
    ///
    /// # Errors
    /// Returns [`InvalidGridError`] when the grid is invalid.
    pub fn points(&self) -> Result<GridPoints, InvalidGridError> {
        Ok(GridPoints::new(self.latitudes()?, self.longitudes()?))
    }

    /// Number of points the grid enumerates.
    ///
    /// # Errors
    /// Returns [`InvalidGridError`] when the grid is invalid.
    pub fn point_count(&self) -> Result<usize, InvalidGridError> {
        Ok(self.points()?.len())
    }
}

/// One axis of a grid: `round6(min + i * step)` for every `i` whose value
/// stays below `max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridAxis {
    min: f64,
    step: f64,
    len: usize,
}

impl GridAxis {
    fn new(min: f64, max: f64, step: f64) -> Self {
        let mut len = Self::estimate_len(min, max, step);
        while len > 0 && Self::value_at(min, step, len - 1) >= max {
            len -= 1;
        }
        while Self::value_at(min, step, len) < max {
            len += 1;
        }
        Self { min, step, len }
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "validated grids have a positive, bounded step count"
    )]
    fn estimate_len(min: f64, max: f64, step: f64) -> usize {
        ((max - min) / step).ceil() as usize
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "axis indices are bounded by GridSpec::MAX_POINTS"
    )]
    fn value_at(min: f64, step: f64, index: usize) -> f64 {
        round_coordinate(index as f64 * step + min)
    }

    /// Number of values on the axis.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Report whether the axis has no values.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Value at `index`, or `None` past the end of the axis.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        (index < self.len).then(|| Self::value_at(self.min, self.step, index))
    }

    /// Iterate over the axis values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(|index| Self::value_at(self.min, self.step, index))
    }
}

/// Iterator over grid points, latitude-major.
///
/// Items are WGS84 coordinates with `x = longitude` and `y = latitude`.
#[derive(Debug, Clone)]
pub struct GridPoints {
    latitudes: GridAxis,
    longitudes: GridAxis,
    row: usize,
    column: usize,
}

impl GridPoints {
    const fn new(latitudes: GridAxis, longitudes: GridAxis) -> Self {
        Self {
            latitudes,
            longitudes,
            row: 0,
            column: 0,
        }
    }

    const fn remaining(&self) -> usize {
        if self.longitudes.is_empty() || self.row >= self.latitudes.len() {
            return 0;
        }
        let rows_left = self.latitudes.len() - self.row;
        rows_left * self.longitudes.len() - self.column
    }
}

impl Iterator for GridPoints {
    type Item = Coord<f64>;

    fn next(&mut self) -> Option<Self::Item> {
        let lat = self.latitudes.get(self.row)?;
        let lon = self.longitudes.get(self.column)?;
        self.column += 1;
        if self.column >= self.longitudes.len() {
            self.column = 0;
            self.row += 1;
        }
        Some(Coord { x: lon, y: lat })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridPoints {}

impl std::iter::FusedIterator for GridPoints {}
