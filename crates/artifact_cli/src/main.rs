//! Command-line front end for the artifact store.
//!
//! # Responsibility
//! - Collect field input, print results, and ask for confirmation before
//!   destructive actions.
//! - Stay a thin adapter: all storage and import rules live in `artifact_core`.

mod commands;

use anyhow::Context;
use artifact_core::{init_logging, StoreConfig};
use clap::{Args, Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "artifact-store")]
#[command(version)]
#[command(about = "Catalogue physical artifacts in a local SQLite database")]
#[command(long_about = r#"
Stores artifacts (name, collection, category, location) in a local SQLite file.

Example usage:
  artifact-store add --name Vase --collection Ming --category Ceramic --location "Hall A"
  artifact-store search Roman
  artifact-store import artifacts.csv
"#)]
pub struct Cli {
    /// Path to the database file [env: ARTIFACT_STORE_DB_PATH]
    #[arg(short = 'd', long = "db", global = true)]
    pub database: Option<PathBuf>,

    /// Absolute directory for log files [env: ARTIFACT_STORE_LOG_DIR]
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error [env: ARTIFACT_STORE_LOG_LEVEL]
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add one artifact
    Add(FieldArgs),

    /// Search all fields for a keyword (empty lists everything)
    Search {
        /// Substring to look for
        #[arg(default_value = "")]
        keyword: String,

        /// Print JSON instead of one line per match
        #[arg(long)]
        json: bool,
    },

    /// Show one artifact
    Show {
        id: i64,

        #[arg(long)]
        json: bool,
    },

    /// Replace all four fields of an artifact (omitted fields become absent)
    Update {
        id: i64,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete an artifact
    Delete {
        id: i64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Import artifacts from a CSV file with a header row
    Import {
        file: PathBuf,

        /// Proceed without asking when expected columns are missing
        #[arg(short, long)]
        yes: bool,
    },

    /// Drop and recreate the table, deleting every artifact
    Reset {
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct FieldArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub collection: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub location: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            let _ = writeln!(io::stderr(), "Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = resolve_config(&cli, StoreConfig::from_env());

    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir).context("failed to initialize logging")?;
    }

    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();
    commands::execute(&config, cli.command, &mut input, &mut output)
}

fn resolve_config(cli: &Cli, mut config: StoreConfig) -> StoreConfig {
    if let Some(database) = &cli.database {
        config.db_path = database.clone();
    }
    if let Some(log_dir) = &cli.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    config
}
