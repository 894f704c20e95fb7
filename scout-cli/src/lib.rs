//! Command-line interface for Smoothie Scout.
//!
//! Two subcommands are offered:
//!
//! - `scan` scores a candidate grid against a competitor CSV and writes the
//!   candidates as JSON or CSV.
//! - `recipe` browses a recipe catalog by goal and flavor and prints a
//!   picked recipe with its remaining nutrient needs and layer breakdown.
//!
//! Options layer CLI flags over `SCOUT_CMDS_<SUBCOMMAND>_<FIELD>`
//! environment variables over configuration files.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use clap::{Parser, Subcommand};

mod error;
mod recipe;
mod scan;

pub use error::CliError;

use recipe::{RecipeArgs, run_recipe};
use scan::{ScanArgs, run_scan};

pub(crate) const ARG_SCAN_COMPETITORS: &str = "competitors";
pub(crate) const ARG_SCAN_LAT_MIN: &str = "lat-min";
pub(crate) const ARG_SCAN_LAT_MAX: &str = "lat-max";
pub(crate) const ARG_SCAN_LON_MIN: &str = "lon-min";
pub(crate) const ARG_SCAN_LON_MAX: &str = "lon-max";
pub(crate) const ARG_SCAN_STEP: &str = "step";
pub(crate) const ARG_SCAN_RADIUS: &str = "radius";
pub(crate) const ARG_SCAN_MIN_RATING: &str = "min-rating";
pub(crate) const ARG_SCAN_MAX_COMPETITORS: &str = "max-competitors";
pub(crate) const ARG_SCAN_METRIC: &str = "metric";
pub(crate) const ARG_SCAN_INDEXED: &str = "indexed";
pub(crate) const ARG_SCAN_SUGGESTED_ONLY: &str = "suggested-only";
pub(crate) const ARG_SCAN_FORMAT: &str = "format";
pub(crate) const ENV_SCAN_COMPETITORS: &str = "SCOUT_CMDS_SCAN_COMPETITORS";

pub(crate) const ARG_RECIPE_CATALOG: &str = "catalog";
pub(crate) const ARG_RECIPE_GOAL: &str = "goal";
pub(crate) const ARG_RECIPE_FLAVOR: &str = "flavor";
pub(crate) const ARG_RECIPE_SEED: &str = "seed";
pub(crate) const ENV_RECIPE_CATALOG: &str = "SCOUT_CMDS_RECIPE_CATALOG";
pub(crate) const ENV_RECIPE_GOAL: &str = "SCOUT_CMDS_RECIPE_GOAL";

/// Run the Smoothie Scout CLI with the current process arguments and
/// environment.
///
/// # Errors
/// Returns [`CliError`] when parsing, configuration, loading, scanning or
/// writing output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Scan(args) => run_scan(args),
        Command::Recipe(args) => run_recipe(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "smoothie-scout",
    about = "Score storefront locations against nearby competitors",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score a candidate grid against a competitor table.
    Scan(ScanArgs),
    /// Browse the recipe catalog and pick a smoothie.
    Recipe(RecipeArgs),
}

/// Check that `path` names an existing regular file before loading it.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match scout_data::fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

#[cfg(test)]
mod tests;
