use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ByteRecord, ReaderBuilder};
use thiserror::Error;
use tracing::{debug, error};

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("failed to open history file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read history file {path}: {source}")]
    Read { path: PathBuf, source: csv::Error },
}

/// Loads delivered-items-per-period values from a comma separated file.
///
/// Errors are logged and yield an empty list; callers must treat an empty
/// history as fatal.
pub fn load_history<P: AsRef<Path>>(path: P) -> Vec<u64> {
    match read_history(path) {
        Ok(values) => values,
        Err(e) => {
            error!("{e}");
            Vec::new()
        }
    }
}

/// Reads the second field of every line as one historical value.
///
/// # Errors
/// - Returns an error when the file cannot be opened.
/// - Returns an error when reading fails part way through.
///
/// Lines with fewer than two fields, or whose second field is not a
/// non-negative integer, are skipped.
pub fn read_history<P: AsRef<Path>>(path: P) -> Result<Vec<u64>, HistoryError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| HistoryError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    parse_history(file).map_err(|source| HistoryError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn parse_history<R: Read>(reader: R) -> Result<Vec<u64>, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut values = Vec::new();
    let mut skipped = 0usize;
    for record in reader.byte_records() {
        let record = match record {
            Ok(record) => record,
            Err(e) if e.is_io_error() => return Err(e),
            Err(e) => {
                debug!("skipping unreadable history line: {e}");
                skipped += 1;
                continue;
            }
        };
        match delivered_items(&record) {
            Some(value) => values.push(value),
            None => skipped += 1,
        }
    }

    debug!(parsed = values.len(), skipped, "parsed history");
    Ok(values)
}

fn delivered_items(record: &ByteRecord) -> Option<u64> {
    let field = record.get(1)?;
    std::str::from_utf8(field).ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn parse_history_takes_second_field_of_each_line() {
        let input = "2024-01-01,3\n2024-01-08,0\n2024-01-15,12,extra\n";
        assert_eq!(parse_history(input.as_bytes()).unwrap(), vec![3, 0, 12]);
    }

    #[test]
    fn parse_history_skips_short_and_malformed_lines() {
        let input = "week,items\nlonely\n\n2024-01-01, 4 \n2024-01-08,-2\n2024-01-15,2.5\n2024-01-22,7\n";
        assert_eq!(parse_history(input.as_bytes()).unwrap(), vec![4, 7]);
    }

    #[test]
    fn parse_history_ignores_quotes_and_crlf() {
        let input = "a,\"5\"\r\nb,6\r\n";
        assert_eq!(parse_history(input.as_bytes()).unwrap(), vec![6]);
    }

    #[test]
    fn read_history_reports_missing_file() {
        let error = read_history("does/not/exist.csv").expect_err("expected open error");
        assert!(matches!(error, HistoryError::Open { .. }));
    }

    #[test]
    fn load_history_returns_empty_on_open_failure() {
        assert!(load_history("does/not/exist.csv").is_empty());
    }

    #[test]
    fn load_history_reads_file_contents() {
        let file = assert_fs::NamedTempFile::new("history.csv").unwrap();
        file.write_str("s1,2\ns2,9\n").unwrap();
        assert_eq!(load_history(file.path()), vec![2, 9]);
    }
}
