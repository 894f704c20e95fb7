//! Error types raised while loading tables.

use camino::Utf8PathBuf;
use scout_core::{CompetitorRecordError, RecipeError};
use thiserror::Error;

/// Errors raised while loading a competitor table or recipe catalog.
///
/// Loading is all-or-nothing: any error aborts the load and no partial table
/// is returned.
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// Opening the source file failed.
    #[error("failed to open {path}")]
    Open {
        /// Requested file path.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The CSV could not be read or a row did not fit the expected columns.
    #[error("failed to read CSV from {path}")]
    Csv {
        /// File being read.
        path: Utf8PathBuf,
        /// Source error from `csv`.
        #[source]
        source: csv::Error,
    },
    /// A row described an invalid competitor.
    #[error("invalid competitor on line {line} of {path}")]
    InvalidCompetitor {
        /// File being read.
        path: Utf8PathBuf,
        /// One-based line number of the row.
        line: u64,
        /// Validation failure.
        #[source]
        source: CompetitorRecordError,
    },
    /// A row described an invalid recipe.
    #[error("invalid recipe on line {line} of {path}")]
    InvalidRecipe {
        /// File being read.
        path: Utf8PathBuf,
        /// One-based line number of the row.
        line: u64,
        /// Validation failure.
        #[source]
        source: RecipeError,
    },
}
