//! Core storage and import logic for the artifact catalogue.
//! This crate is the single source of truth for record invariants.

pub mod config;
pub mod db;
pub mod import;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::StoreConfig;
pub use import::parser::{parse, parse_file, ImportRow, ParseError, ParseResult};
pub use import::reconcile::{
    import_file, missing_columns, reconcile_and_import, ImportDecision, ImportError,
    ImportOutcome, ImportReport, ImportResult, MissingColumns, REQUIRED_COLUMNS,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::artifact::{Artifact, ArtifactFields, ArtifactId};
pub use repo::artifact_repo::{
    ArtifactRepository, SqliteArtifactRepository, StorageError, StorageResult,
};
pub use service::record_store::RecordStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
