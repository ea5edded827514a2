//! Column reconciliation and row-by-row import.
//!
//! # Invariants
//! - The column check inspects only the first row's keys.
//! - Zero rows is vacuously valid: nothing is written and the caller is not
//!   asked anything.
//! - Rows are added in file order, each as its own commit. A storage failure
//!   stops the import and keeps the rows already written.

use crate::import::parser::{parse_file, ImportRow, ParseError};
use crate::model::artifact::{ArtifactFields, ArtifactId};
use crate::repo::artifact_repo::StorageError;
use crate::service::record_store::RecordStore;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Header names mapped onto artifact fields. Matched case-sensitively.
pub const REQUIRED_COLUMNS: [&str; 4] = ["name", "collection", "category", "location"];

pub type ImportResult<T> = Result<T, ImportError>;

/// Failure while importing a file.
#[derive(Debug)]
pub enum ImportError {
    /// The file could not be parsed; nothing was written.
    Parse(ParseError),
    /// Writing a row failed; `imported` earlier rows remain committed.
    Storage {
        imported: usize,
        source: StorageError,
    },
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Storage { imported, source } => write!(
                f,
                "import stopped after {imported} row(s) were committed: {source}"
            ),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Storage { source, .. } => Some(source),
        }
    }
}

impl From<ParseError> for ImportError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

/// Expected columns absent from the file header.
///
/// Not an error: the caller decides whether to go on without them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingColumns {
    /// Absent names, in [`REQUIRED_COLUMNS`] order.
    pub columns: Vec<&'static str>,
}

impl Display for MissingColumns {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "missing column(s): {}", self.columns.join(", "))
    }
}

/// Caller answer when expected columns are missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportDecision {
    Proceed,
    Abort,
}

impl From<bool> for ImportDecision {
    fn from(proceed: bool) -> Self {
        if proceed {
            Self::Proceed
        } else {
            Self::Abort
        }
    }
}

/// Summary of a completed import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Ids assigned to the new rows, in file order.
    pub ids: Vec<ArtifactId>,
    /// Columns that were missing when the caller chose to proceed.
    pub missing: Vec<&'static str>,
}

impl ImportReport {
    pub fn imported(&self) -> usize {
        self.ids.len()
    }
}

/// Result of [`reconcile_and_import`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    Imported(ImportReport),
    /// The caller declined to import a file with missing columns.
    Aborted { missing: MissingColumns },
}

/// Returns the expected columns absent from the first row, if any.
///
/// `None` for zero rows.
pub fn missing_columns(rows: &[ImportRow]) -> Option<MissingColumns> {
    let first = rows.first()?;
    let columns = REQUIRED_COLUMNS
        .into_iter()
        .filter(|column| !first.contains_key(column))
        .collect::<Vec<_>>();

    if columns.is_empty() {
        None
    } else {
        Some(MissingColumns { columns })
    }
}

/// Extracts the four artifact fields from one row; absent keys become `None`.
pub fn row_fields(row: &ImportRow) -> ArtifactFields {
    ArtifactFields {
        name: row.get("name").map(str::to_owned),
        collection: row.get("collection").map(str::to_owned),
        category: row.get("category").map(str::to_owned),
        location: row.get("location").map(str::to_owned),
    }
}

/// Checks columns, asks `decide` when some are missing, then adds every row.
///
/// `decide` is called at most once and blocks the import until it returns.
pub fn reconcile_and_import(
    rows: &[ImportRow],
    store: &RecordStore,
    decide: impl FnOnce(&MissingColumns) -> ImportDecision,
) -> ImportResult<ImportOutcome> {
    let mut report = ImportReport::default();

    if let Some(missing) = missing_columns(rows) {
        warn!(
            "event=import_reconcile module=import status=missing_columns missing={}",
            missing.columns.join("|")
        );
        if decide(&missing) == ImportDecision::Abort {
            info!("event=import_reconcile module=import status=aborted rows={}", rows.len());
            return Ok(ImportOutcome::Aborted { missing });
        }
        report.missing = missing.columns;
    }

    for (index, row) in rows.iter().enumerate() {
        match store.add(&row_fields(row)) {
            Ok(id) => report.ids.push(id),
            Err(source) => {
                error!(
                    "event=import_row module=import status=error row={} imported={} error={source}",
                    index + 1,
                    report.imported()
                );
                return Err(ImportError::Storage {
                    imported: report.imported(),
                    source,
                });
            }
        }
    }

    info!(
        "event=import_reconcile module=import status=ok imported={} missing={}",
        report.imported(),
        report.missing.len()
    );
    Ok(ImportOutcome::Imported(report))
}

/// Parses the CSV file at `path` and imports it into `store`.
pub fn import_file(
    path: impl AsRef<Path>,
    store: &RecordStore,
    decide: impl FnOnce(&MissingColumns) -> ImportDecision,
) -> ImportResult<ImportOutcome> {
    let rows = parse_file(path)?;
    reconcile_and_import(&rows, store, decide)
}
