//! Error types emitted by the Smoothie Scout CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use scout_core::{InvalidGridError, InvalidParamsError, ScoreError};
use scout_data::DataSourceError;
use thiserror::Error;

/// Errors emitted by the Smoothie Scout CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option naming the path.
        field: &'static str,
        /// Path that was not found.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option naming the path.
        field: &'static str,
        /// Path that is not a regular file.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Option naming the path.
        field: &'static str,
        /// Path that could not be inspected.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
    /// The configured grid is malformed.
    #[error("invalid grid: {0}")]
    InvalidGrid(#[from] InvalidGridError),
    /// The configured search parameters are malformed.
    #[error("invalid search parameters: {0}")]
    InvalidParams(#[from] InvalidParamsError),
    /// The scan rejected its inputs.
    #[error("scan failed: {0}")]
    Scan(#[from] ScoreError),
    /// Loading a CSV table failed.
    #[error(transparent)]
    LoadTable(#[from] DataSourceError),
    /// The requested goal is not in the catalog.
    #[error("no recipes target the goal {goal:?}")]
    UnknownGoal {
        /// Goal that was requested.
        goal: String,
    },
    /// No recipe matches the requested goal and flavor.
    #[error("no {flavor:?} recipe targets the goal {goal:?}")]
    NoMatchingRecipe {
        /// Goal that was requested.
        goal: String,
        /// Flavor that was requested.
        flavor: String,
    },
    /// Serializing JSON output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing CSV output failed.
    #[error("failed to write CSV output: {0}")]
    WriteCsv(#[source] csv::Error),
    /// Writing output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
