//! Core domain types for Smoothie Scout.
//!
//! The crate scores candidate storefront locations on a regular
//! latitude/longitude grid against a table of known competitors. Every grid
//! point gathers the competitors within a search radius, averages their
//! ratings, and is tagged as *suggested* when the neighbourhood is both
//! sparse enough and well rated.
//!
//! The models validate their input so downstream components stay honest:
//! constructors return `Result`, and [`score_candidates`] re-validates the
//! grid and parameters before the scan starts.
//!
//! # Examples
//!
//! ```
//! use geo::Coord;
//! use scout_core::{CompetitorRecord, GridSpec, SearchParams, score_candidates};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let competitors = vec![CompetitorRecord::new(
//!     "Juice Lab",
//!     Some(Coord { x: 0.0, y: 0.0 }),
//!     Some(4.5),
//! )?];
//! let grid = GridSpec::new(0.0, 1.0, 0.0, 1.0, 0.5)?;
//! let params = SearchParams::new(200_000.0, 4.0, 1)?;
//!
//! let candidates = score_candidates(&competitors, &grid, &params)?;
//! assert_eq!(candidates.len(), 4);
//! assert!(candidates.iter().all(|candidate| candidate.is_suggested));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod candidate;
mod competitor;
mod distance;
mod grid;
mod index;
mod params;
pub mod recipe;
mod scan;
#[doc(hidden)]
pub mod test_support;

pub use candidate::CandidatePoint;
pub use competitor::{CompetitorRecord, CompetitorRecordError, CompetitorTable};
pub use distance::{DistanceMetric, ParseDistanceMetricError};
pub use grid::{GridAxis, GridPoints, GridSpec, InvalidGridError, round_coordinate};
pub use params::{InvalidParamsError, SearchParams};
pub use recipe::{
    DEFAULT_SMOOTHIE_WEIGHT_G, Layer, LayerCategory, NutrientTargets, Recipe, RecipeCatalog,
    RecipeError, RemainingNutrients, layer_breakdown, layers_for,
};
pub use scan::{ScanOutcome, ScanStrategy, Scanner, ScoreError, score_candidates};
