//! Row-by-row CSV reading shared by the loaders.

use std::io::Read;

use camino::Utf8Path;
use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;

use crate::DataSourceError;

/// Deserialize every data row of a headed CSV and map it with `build`.
///
/// Headers and cells are trimmed. `build` receives each row with its
/// one-based line number.
pub(crate) fn read_rows<R, Row, Item, F>(
    reader: R,
    path: &Utf8Path,
    mut build: F,
) -> Result<Vec<Item>, DataSourceError>
where
    R: Read,
    Row: DeserializeOwned,
    F: FnMut(Row, u64) -> Result<Item, DataSourceError>,
{
    let csv_error = |source| DataSourceError::Csv {
        path: path.to_owned(),
        source,
    };
    let mut csv = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    let headers = csv.headers().map_err(csv_error)?.clone();

    let mut items = Vec::new();
    for row_result in csv.records() {
        let record = row_result.map_err(csv_error)?;
        let line = record.position().map_or(0, csv::Position::line);
        let row: Row = record.deserialize(Some(&headers)).map_err(csv_error)?;
        items.push(build(row, line)?);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Pair {
        key: String,
        value: u32,
    }

    fn read(data: &str) -> Result<Vec<(String, u32, u64)>, DataSourceError> {
        read_rows(data.as_bytes(), Utf8Path::new("pairs.csv"), |row: Pair, line| {
            Ok((row.key, row.value, line))
        })
    }

    #[rstest]
    fn rows_carry_their_line_numbers() {
        let rows = read("key,value\n alpha , 1\nbeta,2\n").expect("rows");
        assert_eq!(
            rows,
            vec![("alpha".to_owned(), 1, 2), ("beta".to_owned(), 2, 3)]
        );
    }

    #[rstest]
    fn malformed_rows_stop_the_read() {
        let err = read("key,value\nalpha,1\nbeta,two\n").expect_err("bad value");
        assert!(matches!(
            err,
            DataSourceError::Csv { ref path, .. } if path.as_str() == "pairs.csv"
        ));
    }
}
