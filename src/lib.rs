//! Facade crate for Smoothie Scout.
//!
//! This crate re-exports the core scoring and recipe types and, behind the
//! `data` feature, the CSV loaders that feed them.

#![forbid(unsafe_code)]

pub use scout_core::{
    CandidatePoint, CompetitorRecord, CompetitorRecordError, CompetitorTable, DistanceMetric,
    GridSpec, InvalidGridError, InvalidParamsError, Layer, LayerCategory, NutrientTargets, Recipe,
    RecipeCatalog, RecipeError, RemainingNutrients, ScanOutcome, ScanStrategy, Scanner,
    ScoreError, SearchParams, layer_breakdown, score_candidates,
};

#[cfg(feature = "data")]
pub use scout_data::{DataSourceError, load_competitors, load_recipes};
