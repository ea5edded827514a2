//! Header-row CSV parsing.
//!
//! # Invariants
//! - The first record is the header; every later record becomes one
//!   [`ImportRow`] keyed by header name, in file order.
//! - A record whose cell count differs from the header is a [`ParseError`].
//! - Cells are kept verbatim (no trimming). Blank lines are skipped.
//! - When a header name repeats, the rightmost cell wins.

use log::{error, info};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type ParseResult<T> = Result<T, ParseError>;

/// Malformed or unreadable import file.
#[derive(Debug)]
pub enum ParseError {
    /// File could not be read (missing, permissions, not UTF-8).
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// CSV structure is inconsistent or undecodable.
    Csv(csv::Error),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read import file `{}`: {source}", path.display())
            }
            Self::Csv(err) => write!(f, "malformed CSV: {err}"),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv(err) => Some(err),
        }
    }
}

impl From<csv::Error> for ParseError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

/// One data row: header name -> cell value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportRow {
    cells: BTreeMap<String, String>,
}

impl ImportRow {
    /// Returns the cell under `column`, if the file has that header.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// Returns whether the row has a cell for `column`.
    pub fn contains_key(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }
}

impl<K, V> FromIterator<(K, V)> for ImportRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Parses CSV text into row mappings.
///
/// Empty input and header-only input both yield zero rows.
pub fn parse(contents: &str) -> ParseResult<Vec<ImportRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(contents.as_bytes());

    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(err) => {
            error!("event=import_parse module=import status=error error_code=bad_header error={err}");
            return Err(err.into());
        }
    };

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                error!(
                    "event=import_parse module=import status=error error_code=bad_record rows_read={} error={err}",
                    rows.len()
                );
                return Err(err.into());
            }
        };
        rows.push(headers.iter().zip(record.iter()).collect::<ImportRow>());
    }

    info!(
        "event=import_parse module=import status=ok columns={} rows={}",
        headers.len(),
        rows.len()
    );
    Ok(rows)
}

/// Reads and parses a CSV file from disk.
pub fn parse_file(path: impl AsRef<Path>) -> ParseResult<Vec<ImportRow>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| {
        error!("event=import_parse module=import status=error error_code=read_failed error={source}");
        ParseError::Io {
            path: path.to_path_buf(),
            source,
        }
    })?;
    parse(&contents)
}

#[cfg(test)]
mod tests {
    use super::{parse, ParseError};

    #[test]
    fn parse_maps_cells_to_headers_in_file_order() {
        let rows = parse("name,location\nVase,Hall A\nCoin,Vault\n").unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("name"), Some("Vase"));
        assert_eq!(rows[0].get("location"), Some("Hall A"));
        assert_eq!(rows[1].get("name"), Some("Coin"));
        assert_eq!(rows[1].get("category"), None);
    }

    #[test]
    fn parse_keeps_quoted_commas_and_whitespace() {
        let rows = parse("name,location\n\"Urn, lidded\",  Hall B \n").unwrap();

        assert_eq!(rows[0].get("name"), Some("Urn, lidded"));
        assert_eq!(rows[0].get("location"), Some("  Hall B "));
    }

    #[test]
    fn parse_empty_and_header_only_input_yield_no_rows() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("name,collection,category,location\n").unwrap().is_empty());
    }

    #[test]
    fn parse_rejects_ragged_rows() {
        let err = parse("name,location\nVase\n").unwrap_err();
        assert!(matches!(err, ParseError::Csv(_)));
    }

    #[test]
    fn duplicate_header_keeps_rightmost_cell() {
        let rows = parse("name,name\nfirst,second\n").unwrap();
        assert_eq!(rows[0].get("name"), Some("second"));
    }
}
