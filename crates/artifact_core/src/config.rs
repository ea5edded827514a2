//! Runtime configuration resolved from environment variables.
//!
//! # Invariants
//! - Blank variables behave as unset.
//! - The destructive startup reset is off unless explicitly enabled.

use crate::logging::default_log_level;
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "ARTIFACT_STORE_DB_PATH";
pub const LOG_DIR_ENV: &str = "ARTIFACT_STORE_LOG_DIR";
pub const LOG_LEVEL_ENV: &str = "ARTIFACT_STORE_LOG_LEVEL";
pub const RESET_ON_STARTUP_ENV: &str = "ARTIFACT_STORE_RESET_ON_STARTUP";

const DEFAULT_DB_FILE_NAME: &str = "artifacts.db";

/// Store settings shared by every front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// SQLite database file.
    pub db_path: PathBuf,
    /// Absolute directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    /// One of `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Drop and recreate the table on startup, discarding all records.
    pub reset_on_startup: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            log_dir: None,
            log_level: default_log_level().to_string(),
            reset_on_startup: false,
        }
    }
}

impl StoreConfig {
    /// Resolves configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|trimmed| !trimmed.is_empty())
        };

        let defaults = Self::default();
        Self {
            db_path: value(DB_PATH_ENV).map_or(defaults.db_path, PathBuf::from),
            log_dir: value(LOG_DIR_ENV).map(PathBuf::from),
            log_level: value(LOG_LEVEL_ENV).unwrap_or(defaults.log_level),
            reset_on_startup: value(RESET_ON_STARTUP_ENV).is_some_and(|raw| parse_flag(&raw)),
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
