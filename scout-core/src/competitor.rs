//! Competitor records and the immutable table that holds them.

use std::ops::RangeInclusive;

use geo::Coord;
use thiserror::Error;

/// Inclusive range of valid star ratings.
pub(crate) const RATING_RANGE: RangeInclusive<f64> = 1.0..=5.0;

/// A known competitor storefront.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. The
/// location is optional so that rows with missing coordinates survive
/// loading; the scanner skips them instead of aborting.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use scout_core::CompetitorRecord;
///
/// # fn main() -> Result<(), scout_core::CompetitorRecordError> {
/// let record = CompetitorRecord::new("Juice Lab", Some(Coord { x: 8.54, y: 47.37 }), Some(4.6))?;
/// assert_eq!(record.latitude(), Some(47.37));
/// assert_eq!(record.rating, Some(4.6));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompetitorRecord {
    /// Display name of the storefront.
    pub name: String,
    /// Geospatial position, when known.
    pub location: Option<Coord<f64>>,
    /// Star rating in `1.0..=5.0`, when the competitor has been rated.
    pub rating: Option<f64>,
}

/// Errors returned by [`CompetitorRecord::new`].
#[derive(Debug, Error, PartialEq)]
pub enum CompetitorRecordError {
    /// The competitor name was empty or whitespace.
    #[error("competitor name must not be empty")]
    EmptyName,
    /// The rating fell outside `1.0..=5.0` or was not finite.
    #[error("rating {rating} for {name:?} must be between 1.0 and 5.0")]
    RatingOutOfRange {
        /// Name of the offending competitor.
        name: String,
        /// Rating that failed validation.
        rating: f64,
    },
}

impl CompetitorRecord {
    /// Validates and constructs a [`CompetitorRecord`].
    ///
    /// # Errors
    /// Returns [`CompetitorRecordError`] when the name is blank or the rating
    /// is outside `1.0..=5.0`.
    pub fn new(
        raw_name: impl Into<String>,
        location: Option<Coord<f64>>,
        rating: Option<f64>,
    ) -> Result<Self, CompetitorRecordError> {
        let name = raw_name.into();
        if name.trim().is_empty() {
            return Err(CompetitorRecordError::EmptyName);
        }
        if let Some(value) = rating
            && !RATING_RANGE.contains(&value)
        {
            return Err(CompetitorRecordError::RatingOutOfRange {
                name,
                rating: value,
            });
        }
        Ok(Self {
            name,
            location,
            rating,
        })
    }

    /// Latitude in decimal degrees, when known.
    #[must_use]
    pub fn latitude(&self) -> Option<f64> {
        self.location.map(|coord| coord.y)
    }

    /// Longitude in decimal degrees, when known.
    #[must_use]
    pub fn longitude(&self) -> Option<f64> {
        self.location.map(|coord| coord.x)
    }

    /// Return the location if it is usable for distance computations.
    ///
    /// Missing, non-finite or out-of-range coordinates yield `None`.
    #[must_use]
    pub fn usable_location(&self) -> Option<Coord<f64>> {
        self.location.filter(|coord| {
            coord.x.is_finite()
                && coord.y.is_finite()
                && (-180.0..=180.0).contains(&coord.x)
                && (-90.0..=90.0).contains(&coord.y)
        })
    }

    /// Return the rating if it contributes to averages.
    #[must_use]
    pub fn usable_rating(&self) -> Option<f64> {
        self.rating.filter(|value| RATING_RANGE.contains(value))
    }
}

/// Read-only table of competitors, loaded once and shared by reference.
///
/// # Examples
///
/// ```
/// use scout_core::{CompetitorRecord, CompetitorTable};
///
/// # fn main() -> Result<(), scout_core::CompetitorRecordError> {
/// let table = CompetitorTable::from(vec![CompetitorRecord::new("Blend Bar", None, None)?]);
/// assert_eq!(table.len(), 1);
/// assert_eq!(table.located().count(), 0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompetitorTable {
    records: Vec<CompetitorRecord>,
}

impl CompetitorTable {
    /// Borrow every record in load order.
    #[must_use]
    pub const fn records(&self) -> &[CompetitorRecord] {
        self.records.as_slice()
    }

    /// Iterate over the records in load order.
    pub fn iter(&self) -> std::slice::Iter<'_, CompetitorRecord> {
        self.records.iter()
    }

    /// Iterate over records whose coordinates are usable.
    pub fn located(&self) -> impl Iterator<Item = &CompetitorRecord> + '_ {
        self.records
            .iter()
            .filter(|record| record.usable_location().is_some())
    }

    /// Number of records in the table.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    /// Report whether the table holds no records.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<CompetitorRecord>> for CompetitorTable {
    fn from(records: Vec<CompetitorRecord>) -> Self {
        Self { records }
    }
}

impl FromIterator<CompetitorRecord> for CompetitorTable {
    fn from_iter<I: IntoIterator<Item = CompetitorRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CompetitorTable {
    type Item = &'a CompetitorRecord;
    type IntoIter = std::slice::Iter<'a, CompetitorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
