//! The candidate scan: enumerate the grid, tally nearby competitors, and
//! classify every rated neighbourhood.

use geo::Coord;
use log::{debug, warn};
use thiserror::Error;

use crate::index::CompetitorIndex;
use crate::{
    CandidatePoint, CompetitorRecord, GridSpec, InvalidGridError, InvalidParamsError,
    SearchParams,
};

/// Errors raised before a scan starts. No partial results are produced.
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum ScoreError {
    /// The grid cannot be enumerated.
    #[error(transparent)]
    Grid(#[from] InvalidGridError),
    /// The search parameters are malformed.
    #[error(transparent)]
    Params(#[from] InvalidParamsError),
}

/// How competitors are gathered around each grid point.
///
/// Both strategies produce identical output; `Indexed` only avoids exact
/// distance tests against far-away competitors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ScanStrategy {
    /// Measure the distance to every competitor from every grid point.
    #[default]
    Exhaustive,
    /// Prefilter competitors with an R\*-tree before measuring distances.
    Indexed,
}

/// Result of a scan together with bookkeeping counters.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanOutcome {
    /// Scored candidates in grid-enumeration order.
    pub candidates: Vec<CandidatePoint>,
    /// Number of grid points examined.
    pub grid_points: usize,
    /// Competitor records skipped because their coordinates were unusable.
    pub skipped_records: usize,
}

impl ScanOutcome {
    /// Iterate over the suggested candidates in enumeration order.
    pub fn suggested(&self) -> impl Iterator<Item = &CandidatePoint> + '_ {
        self.candidates
            .iter()
            .filter(|candidate| candidate.is_suggested)
    }

    /// Number of suggested candidates.
    #[must_use]
    pub fn suggested_count(&self) -> usize {
        self.suggested().count()
    }
}

/// Scores grid points against a competitor table.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use scout_core::{CompetitorRecord, GridSpec, ScanStrategy, Scanner, SearchParams};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let competitors = vec![
///     CompetitorRecord::new("Juice Lab", Some(Coord { x: 0.0, y: 0.0 }), Some(5.0))?,
///     CompetitorRecord::new("Lost Pin", None, Some(2.0))?,
/// ];
/// let grid = GridSpec::new(0.0, 1.0, 0.0, 1.0, 0.5)?;
/// let scanner = Scanner::new(SearchParams::new(60_000.0, 4.0, 1)?)
///     .with_strategy(ScanStrategy::Indexed);
///
/// let outcome = scanner.scan(&competitors, &grid)?;
/// assert_eq!(outcome.grid_points, 4);
/// assert_eq!(outcome.skipped_records, 1);
/// assert_eq!(outcome.candidates.len(), 3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scanner {
    params: SearchParams,
    strategy: ScanStrategy,
}

impl Scanner {
    /// Create an exhaustive scanner for `params`.
    #[must_use]
    pub const fn new(params: SearchParams) -> Self {
        Self {
            params,
            strategy: ScanStrategy::Exhaustive,
        }
    }

    /// Replace the neighbour-gathering strategy.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: ScanStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Parameters used by this scanner.
    #[must_use]
    pub const fn params(&self) -> &SearchParams {
        &self.params
    }

    /// Strategy used by this scanner.
    #[must_use]
    pub const fn strategy(&self) -> ScanStrategy {
        self.strategy
    }

    /// Score every grid point against `competitors`.
    ///
    /// Records without usable coordinates are skipped and counted in
    /// [`ScanOutcome::skipped_records`].
    ///
    /// # Errors
    /// Returns [`ScoreError`] when the grid or the parameters are invalid.
    pub fn scan(
        &self,
        competitors: &[CompetitorRecord],
        grid: &GridSpec,
    ) -> Result<ScanOutcome, ScoreError> {
        let points = grid.points()?;
        self.params.validate()?;

        let (located, skipped_records) = locate(competitors);
        let neighbours = Neighbours::build(self.strategy, &located);
        let grid_points = points.len();

        let candidates: Vec<CandidatePoint> = points
            .filter_map(|point| {
                let tally = neighbours.tally(point, &located, &self.params);
                tally.classify(point, &self.params)
            })
            .collect();

        debug!(
            "scanned {grid_points} grid points against {} competitors ({skipped_records} skipped): {} candidates",
            located.len(),
            candidates.len(),
        );
        Ok(ScanOutcome {
            candidates,
            grid_points,
            skipped_records,
        })
    }
}

/// Score every grid point against `competitors` with an exhaustive scan.
///
/// Candidates are returned in grid-enumeration order (latitude-major, then
/// longitude). Grid points without a rated competitor nearby are omitted.
///
/// # Errors
/// Returns [`ScoreError::Grid`] for malformed grids and
/// [`ScoreError::Params`] for malformed parameters.
pub fn score_candidates(
    competitors: &[CompetitorRecord],
    grid: &GridSpec,
    params: &SearchParams,
) -> Result<Vec<CandidatePoint>, ScoreError> {
    Scanner::new(*params)
        .scan(competitors, grid)
        .map(|outcome| outcome.candidates)
}

/// A competitor with usable coordinates.
#[derive(Debug, Clone, Copy)]
struct Located {
    location: Coord<f64>,
    rating: Option<f64>,
}

fn locate(competitors: &[CompetitorRecord]) -> (Vec<Located>, usize) {
    let mut skipped = 0_usize;
    let located = competitors
        .iter()
        .filter_map(|record| {
            let Some(location) = record.usable_location() else {
                warn!(
                    "skipping competitor {:?}: missing or invalid coordinates",
                    record.name
                );
                skipped += 1;
                return None;
            };
            Some(Located {
                location,
                rating: record.usable_rating(),
            })
        })
        .collect();
    (located, skipped)
}

enum Neighbours {
    Exhaustive,
    Indexed(CompetitorIndex),
}

impl Neighbours {
    fn build(strategy: ScanStrategy, located: &[Located]) -> Self {
        match strategy {
            ScanStrategy::Exhaustive => Self::Exhaustive,
            ScanStrategy::Indexed => {
                Self::Indexed(CompetitorIndex::new(located.iter().map(|c| c.location)))
            }
        }
    }

    fn tally(&self, point: Coord<f64>, located: &[Located], params: &SearchParams) -> Tally {
        match self {
            Self::Exhaustive => Tally::over(point, located.iter(), params),
            Self::Indexed(index) => {
                let positions = index.candidates_near(point, params.radius_meters);
                Tally::over(
                    point,
                    positions
                        .into_iter()
                        .filter_map(|position| located.get(position)),
                    params,
                )
            }
        }
    }
}

/// Running totals for one grid point.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct Tally {
    nearby: usize,
    rated: usize,
    rating_sum: f64,
}

impl Tally {
    /// Accumulate competitors in the order given; ratings are summed in
    /// that order so both strategies produce bit-identical averages.
    #[expect(
        clippy::float_arithmetic,
        reason = "ratings are summed before averaging"
    )]
    fn over<'a, I>(point: Coord<f64>, competitors: I, params: &SearchParams) -> Self
    where
        I: Iterator<Item = &'a Located>,
    {
        let mut tally = Self::default();
        for competitor in competitors {
            let distance = params.metric.distance_meters(point, competitor.location);
            if distance < params.radius_meters {
                tally.nearby += 1;
                if let Some(rating) = competitor.rating {
                    tally.rated += 1;
                    tally.rating_sum += rating;
                }
            }
        }
        tally
    }

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "the mean divides the rating sum by a small count"
    )]
    fn average(&self) -> Option<f64> {
        (self.rated > 0).then(|| self.rating_sum / self.rated as f64)
    }

    fn classify(&self, point: Coord<f64>, params: &SearchParams) -> Option<CandidatePoint> {
        let avg_rating = self.average()?;
        Some(CandidatePoint {
            latitude: point.y,
            longitude: point.x,
            nearby_count: self.nearby,
            avg_rating,
            is_suggested: params.accepts(self.nearby, avg_rating),
        })
    }
}

#[cfg(test)]
mod tests;
