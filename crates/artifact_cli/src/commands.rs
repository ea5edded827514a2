//! Subcommand handlers.
//!
//! Handlers take the prompt input and result output as parameters so they
//! can run against in-memory buffers in tests.

use crate::{Command, FieldArgs};
use anyhow::Context;
use artifact_core::{
    import_file, Artifact, ArtifactFields, ImportDecision, ImportOutcome, MissingColumns,
    RecordStore, StoreConfig,
};
use log::warn;
use std::io::{BufRead, Write};
use std::process::ExitCode;

impl From<FieldArgs> for ArtifactFields {
    fn from(args: FieldArgs) -> Self {
        Self {
            name: args.name,
            collection: args.collection,
            category: args.category,
            location: args.location,
        }
    }
}

/// Prepares the store and runs one subcommand.
pub fn execute(
    config: &StoreConfig,
    command: Command,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    let store = RecordStore::new(&config.db_path);
    open_store(&store, config)?;

    match command {
        Command::Add(fields) => {
            let id = store.add(&fields.into()).context("failed to add artifact")?;
            writeln!(output, "Artifact added successfully! id={id}")?;
        }
        Command::Search { keyword, json } => {
            let artifacts = store
                .find_by_keyword(&keyword)
                .context("failed to search artifacts")?;
            if json {
                writeln!(output, "{}", serde_json::to_string_pretty(&artifacts)?)?;
            } else if artifacts.is_empty() {
                writeln!(output, "No results.")?;
            } else {
                for artifact in &artifacts {
                    writeln!(output, "{}", summary_line(artifact))?;
                }
            }
        }
        Command::Show { id, json } => {
            let Some(artifact) = store.get_by_id(id).context("failed to load artifact")? else {
                writeln!(output, "Artifact {id} not found.")?;
                return Ok(ExitCode::FAILURE);
            };
            if json {
                writeln!(output, "{}", serde_json::to_string_pretty(&artifact)?)?;
            } else {
                write_details(output, &artifact)?;
            }
        }
        Command::Update { id, fields } => {
            if store.get_by_id(id)?.is_none() {
                writeln!(output, "Artifact {id} not found.")?;
                return Ok(ExitCode::FAILURE);
            }
            store
                .update(id, &fields.into())
                .context("failed to save changes")?;
            writeln!(output, "Changes saved successfully!")?;
        }
        Command::Delete { id, yes } => {
            if !yes && !confirm(input, output, "Are you sure you want to delete this artifact?")? {
                writeln!(output, "Delete cancelled.")?;
                return Ok(ExitCode::SUCCESS);
            }
            store.delete(id).context("failed to delete artifact")?;
            writeln!(output, "Artifact deleted successfully!")?;
        }
        Command::Import { file, yes } => {
            let outcome = import_file(&file, &store, |missing| {
                if yes {
                    return ImportDecision::Proceed;
                }
                ask_missing_columns(input, output, missing)
            })
            .with_context(|| format!("error importing data from `{}`", file.display()))?;

            match outcome {
                ImportOutcome::Imported(report) => writeln!(
                    output,
                    "Artifacts imported successfully! rows={}",
                    report.imported()
                )?,
                ImportOutcome::Aborted { .. } => writeln!(output, "Import cancelled.")?,
            }
        }
        Command::Reset { yes } => {
            if !yes
                && !confirm(
                    input,
                    output,
                    "This deletes every artifact. Are you sure?",
                )?
            {
                writeln!(output, "Reset cancelled.")?;
                return Ok(ExitCode::SUCCESS);
            }
            store.reset_table().context("failed to reset database")?;
            writeln!(output, "Database reset.")?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn open_store(store: &RecordStore, config: &StoreConfig) -> anyhow::Result<()> {
    if config.reset_on_startup {
        warn!("event=startup_reset module=cli status=start");
        store
            .reset_table()
            .context("failed to reset database on startup")?;
    } else {
        store.create_table().with_context(|| {
            format!("failed to open database `{}`", store.db_path().display())
        })?;
    }
    Ok(())
}

fn ask_missing_columns(
    input: &mut impl BufRead,
    output: &mut impl Write,
    missing: &MissingColumns,
) -> ImportDecision {
    let prompt = format!("The CSV file has {missing}. Proceed anyway?");
    match confirm(input, output, &prompt) {
        Ok(answer) => answer.into(),
        Err(err) => {
            warn!("event=import_prompt module=cli status=error error={err}");
            ImportDecision::Abort
        }
    }
}

fn confirm(
    input: &mut impl BufRead,
    output: &mut impl Write,
    prompt: &str,
) -> std::io::Result<bool> {
    write!(output, "{prompt} [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn summary_line(artifact: &Artifact) -> String {
    format!(
        "{} {} ({})",
        artifact.id,
        artifact.name().unwrap_or_default(),
        artifact.category().unwrap_or_default()
    )
}

fn write_details(output: &mut impl Write, artifact: &Artifact) -> std::io::Result<()> {
    writeln!(output, "Id:         {}", artifact.id)?;
    writeln!(output, "Name:       {}", artifact.name().unwrap_or_default())?;
    writeln!(output, "Collection: {}", artifact.collection().unwrap_or_default())?;
    writeln!(output, "Category:   {}", artifact.category().unwrap_or_default())?;
    writeln!(output, "Location:   {}", artifact.location().unwrap_or_default())
}
