//! Competitor table loader.

use std::io::Read;

use camino::Utf8Path;
use geo::Coord;
use log::debug;
use scout_core::{CompetitorRecord, CompetitorTable};
use serde::Deserialize;

use crate::DataSourceError;
use crate::fs::open_utf8_file;
use crate::table::read_rows;

/// One row of the competitor CSV.
///
/// Unparseable numeric cells are read as absent; the scan later skips rows
/// without coordinates.
#[derive(Debug, Deserialize)]
struct CompetitorRow {
    name: String,
    #[serde(alias = "latitude", deserialize_with = "csv::invalid_option")]
    lat: Option<f64>,
    #[serde(alias = "longitude", deserialize_with = "csv::invalid_option")]
    lon: Option<f64>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    rating: Option<f64>,
}

impl CompetitorRow {
    fn into_record(self, path: &Utf8Path, line: u64) -> Result<CompetitorRecord, DataSourceError> {
        let location = match (self.lat, self.lon) {
            (Some(y), Some(x)) => Some(Coord { x, y }),
            _ => None,
        };
        let rating = self.rating.filter(|value| value.is_finite());
        CompetitorRecord::new(self.name, location, rating).map_err(|source| {
            DataSourceError::InvalidCompetitor {
                path: path.to_owned(),
                line,
                source,
            }
        })
    }
}

/// Load the competitor table stored at `path`.
///
/// # Errors
/// Returns [`DataSourceError`] when the file cannot be opened, the CSV is
/// malformed, or a row fails validation.
pub fn load_competitors(path: &Utf8Path) -> Result<CompetitorTable, DataSourceError> {
    let file = open_utf8_file(path).map_err(|source| DataSourceError::Open {
        path: path.to_owned(),
        source,
    })?;
    read_competitors(file, path)
}

/// Read a competitor table from `reader`; `path` labels errors.
///
/// The header must name `name`, `lat` (or `latitude`) and `lon` (or
/// `longitude`); `rating` is optional and extra columns are ignored.
///
/// # Errors
/// Returns [`DataSourceError`] when the CSV is malformed or a row fails
/// validation.
pub fn read_competitors<R: Read>(
    reader: R,
    path: &Utf8Path,
) -> Result<CompetitorTable, DataSourceError> {
    let records = read_rows(reader, path, |row: CompetitorRow, line| {
        row.into_record(path, line)
    })?;
    let table = CompetitorTable::from(records);
    debug!(
        "loaded {} competitors from {path} ({} with coordinates)",
        table.len(),
        table.located().count()
    );
    Ok(table)
}
