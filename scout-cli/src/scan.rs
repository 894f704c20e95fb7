//! Scan command implementation for the Smoothie Scout CLI.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use log::info;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use scout_core::{CandidatePoint, DistanceMetric, GridSpec, ScanStrategy, Scanner, SearchParams};
use scout_data::load_competitors;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::{
    ARG_SCAN_COMPETITORS, ARG_SCAN_FORMAT, ARG_SCAN_INDEXED, ARG_SCAN_LAT_MAX, ARG_SCAN_LAT_MIN,
    ARG_SCAN_LON_MAX, ARG_SCAN_LON_MIN, ARG_SCAN_MAX_COMPETITORS, ARG_SCAN_METRIC,
    ARG_SCAN_MIN_RATING, ARG_SCAN_RADIUS, ARG_SCAN_STEP, ARG_SCAN_SUGGESTED_ONLY, CliError,
    ENV_SCAN_COMPETITORS, require_existing,
};

/// Default grid: central Zurich.
pub(crate) const DEFAULT_LAT_MIN: f64 = 47.34;
pub(crate) const DEFAULT_LAT_MAX: f64 = 47.42;
pub(crate) const DEFAULT_LON_MIN: f64 = 8.49;
pub(crate) const DEFAULT_LON_MAX: f64 = 8.57;
pub(crate) const DEFAULT_STEP: f64 = 0.005;
pub(crate) const DEFAULT_RADIUS_METERS: f64 = 400.0;
pub(crate) const DEFAULT_MIN_RATING: f64 = 4.3;
pub(crate) const DEFAULT_MAX_COMPETITORS: i64 = 1;

/// Column order used when no candidate row carries a header.
const CSV_HEADER: [&str; 5] = [
    "latitude",
    "longitude",
    "nearby_count",
    "avg_rating",
    "is_suggested",
];

/// Output encodings for scan results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum OutputFormat {
    /// Pretty-printed JSON array.
    #[default]
    Json,
    /// CSV with a header row.
    Csv,
}

/// CLI arguments for the `scan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "scan",
    long_about = "Score every point of a latitude/longitude grid against a \
                 competitor CSV. Each point counts the competitors within the \
                 search radius and averages their ratings; points with few, \
                 well-rated neighbours are marked as suggested. Defaults \
                 cover central Zurich.",
    about = "Score candidate locations against a competitor table"
)]
#[ortho_config(prefix = "SCOUT")]
pub(crate) struct ScanArgs {
    /// Path to the competitor CSV (`name`, `lat`, `lon`, `rating`).
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) competitors: Option<Utf8PathBuf>,
    /// Southern grid bound in degrees (inclusive).
    #[arg(long = ARG_SCAN_LAT_MIN, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat_min: Option<f64>,
    /// Northern grid bound in degrees (exclusive).
    #[arg(long = ARG_SCAN_LAT_MAX, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat_max: Option<f64>,
    /// Western grid bound in degrees (inclusive).
    #[arg(long = ARG_SCAN_LON_MIN, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lon_min: Option<f64>,
    /// Eastern grid bound in degrees (exclusive).
    #[arg(long = ARG_SCAN_LON_MAX, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lon_max: Option<f64>,
    /// Grid spacing in degrees.
    #[arg(long = ARG_SCAN_STEP, value_name = "degrees")]
    #[serde(default)]
    pub(crate) step: Option<f64>,
    /// Search radius around each grid point, in metres.
    #[arg(long = ARG_SCAN_RADIUS, value_name = "metres")]
    #[serde(default)]
    pub(crate) radius: Option<f64>,
    /// Minimum average rating of nearby competitors.
    #[arg(long = ARG_SCAN_MIN_RATING, value_name = "stars", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) min_rating: Option<f64>,
    /// Maximum number of nearby competitors.
    #[arg(long = ARG_SCAN_MAX_COMPETITORS, value_name = "count", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) max_competitors: Option<i64>,
    /// Distance formula: `geodesic` or `haversine`.
    #[arg(long = ARG_SCAN_METRIC, value_name = "metric")]
    #[serde(default)]
    pub(crate) metric: Option<DistanceMetric>,
    /// Prefilter competitors with a spatial index.
    #[arg(
        long = ARG_SCAN_INDEXED,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "bool"
    )]
    #[serde(default)]
    pub(crate) indexed: Option<bool>,
    /// Only print suggested candidates.
    #[arg(
        long = ARG_SCAN_SUGGESTED_ONLY,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "bool"
    )]
    #[serde(default)]
    pub(crate) suggested_only: Option<bool>,
    /// Output encoding.
    #[arg(long = ARG_SCAN_FORMAT, value_enum, value_name = "format")]
    #[serde(default)]
    pub(crate) format: Option<OutputFormat>,
}

impl ScanArgs {
    pub(crate) fn into_config(self) -> Result<ScanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ScanConfig::try_from(merged)
    }
}

/// Resolved `scan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScanConfig {
    /// Path to the competitor CSV.
    pub(crate) competitors: Utf8PathBuf,
    /// Validated grid.
    pub(crate) grid: GridSpec,
    /// Validated thresholds and metric.
    pub(crate) params: SearchParams,
    /// Neighbour-gathering strategy.
    pub(crate) strategy: ScanStrategy,
    /// Drop candidates that are not suggested.
    pub(crate) suggested_only: bool,
    /// Output encoding.
    pub(crate) format: OutputFormat,
}

impl ScanConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.competitors, ARG_SCAN_COMPETITORS)
    }
}

impl TryFrom<ScanArgs> for ScanConfig {
    type Error = CliError;

    fn try_from(args: ScanArgs) -> Result<Self, Self::Error> {
        let competitors = args.competitors.ok_or(CliError::MissingArgument {
            field: ARG_SCAN_COMPETITORS,
            env: ENV_SCAN_COMPETITORS,
        })?;
        let grid = GridSpec::new(
            args.lat_min.unwrap_or(DEFAULT_LAT_MIN),
            args.lat_max.unwrap_or(DEFAULT_LAT_MAX),
            args.lon_min.unwrap_or(DEFAULT_LON_MIN),
            args.lon_max.unwrap_or(DEFAULT_LON_MAX),
            args.step.unwrap_or(DEFAULT_STEP),
        )?;
        let params = SearchParams::new(
            args.radius.unwrap_or(DEFAULT_RADIUS_METERS),
            args.min_rating.unwrap_or(DEFAULT_MIN_RATING),
            args.max_competitors.unwrap_or(DEFAULT_MAX_COMPETITORS),
        )?
        .with_metric(args.metric.unwrap_or_default());
        let strategy = if args.indexed.unwrap_or(false) {
            ScanStrategy::Indexed
        } else {
            ScanStrategy::Exhaustive
        };

        Ok(Self {
            competitors,
            grid,
            params,
            strategy,
            suggested_only: args.suggested_only.unwrap_or(false),
            format: args.format.unwrap_or_default(),
        })
    }
}

pub(crate) fn run_scan(args: ScanArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_scan_with(args, &mut stdout)
}

pub(crate) fn run_scan_with(args: ScanArgs, writer: &mut dyn Write) -> Result<(), CliError> {
    let config = resolve_scan_config(args)?;
    let candidates = execute_scan(&config)?;
    match config.format {
        OutputFormat::Json => write_json(writer, &candidates),
        OutputFormat::Csv => write_csv(writer, &candidates),
    }
}

fn resolve_scan_config(args: ScanArgs) -> Result<ScanConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Load the competitor table and score the configured grid.
pub(crate) fn execute_scan(config: &ScanConfig) -> Result<Vec<CandidatePoint>, CliError> {
    let competitors = load_competitors(&config.competitors)?;
    let outcome = Scanner::new(config.params)
        .with_strategy(config.strategy)
        .scan(competitors.records(), &config.grid)?;
    info!(
        "{} of {} candidates suggested across {} grid points",
        outcome.suggested_count(),
        outcome.candidates.len(),
        outcome.grid_points
    );

    if config.suggested_only {
        Ok(outcome.suggested().copied().collect())
    } else {
        Ok(outcome.candidates)
    }
}

fn write_json(writer: &mut dyn Write, candidates: &[CandidatePoint]) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(candidates).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

fn write_csv(writer: &mut dyn Write, candidates: &[CandidatePoint]) -> Result<(), CliError> {
    let mut csv = csv::Writer::from_writer(writer);
    if candidates.is_empty() {
        csv.write_record(CSV_HEADER).map_err(CliError::WriteCsv)?;
    }
    for candidate in candidates {
        csv.serialize(candidate).map_err(CliError::WriteCsv)?;
    }
    csv.flush().map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ScanConfig, CliError> {
    let merged = ScanArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ScanConfig::try_from(merged)
}
