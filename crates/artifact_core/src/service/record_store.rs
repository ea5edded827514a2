//! Record store: the caller-facing artifact CRUD and search service.
//!
//! # Responsibility
//! - Expose create-table, add, search, get, update and delete as plain calls.
//! - Scope one SQLite connection to each call.
//!
//! # Invariants
//! - No connection outlives the call that opened it; every exit path,
//!   including errors, drops it.
//! - Each write is committed on return (autocommit statement).
//! - Update and delete of an unknown id are silent no-ops.
//! - Log events carry ids and counts only, never field values.

use crate::db::schema::{ensure_schema, reset_schema};
use crate::db::open_db;
use crate::model::artifact::{Artifact, ArtifactFields, ArtifactId};
use crate::repo::artifact_repo::{
    ArtifactRepository, SqliteArtifactRepository, StorageError, StorageResult,
};
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Artifact store bound to one SQLite database file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStore {
    db_path: PathBuf,
}

impl RecordStore {
    /// Creates a store for `db_path`. Nothing is opened until the first call.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Returns the database file this store operates on.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Ensures the `artifacts` table exists. Idempotent.
    ///
    /// # Errors
    /// - Storage errors, including a table created by an incompatible layout.
    pub fn create_table(&self) -> StorageResult<()> {
        let conn = open_db(&self.db_path)?;
        ensure_schema(&conn)?;
        Ok(())
    }

    /// Drops and recreates the `artifacts` table, discarding all records.
    pub fn reset_table(&self) -> StorageResult<()> {
        let mut conn = open_db(&self.db_path)?;
        reset_schema(&mut conn)?;
        Ok(())
    }

    /// Inserts one artifact exactly as given and returns its new id.
    pub fn add(&self, fields: &ArtifactFields) -> StorageResult<ArtifactId> {
        self.with_repo("artifact_add", |repo| {
            let id = repo.create_artifact(fields)?;
            debug!("event=artifact_add module=store status=ok artifact_id={id}");
            Ok(id)
        })
    }

    /// Returns every artifact with `keyword` in any field, in insertion order.
    ///
    /// An empty keyword returns all artifacts. ASCII letters match
    /// case-insensitively; every other character matches literally.
    pub fn find_by_keyword(&self, keyword: &str) -> StorageResult<Vec<Artifact>> {
        self.with_repo("artifact_search", |repo| {
            let artifacts = repo.find_by_keyword(keyword)?;
            debug!(
                "event=artifact_search module=store status=ok keyword_chars={} hits={}",
                keyword.chars().count(),
                artifacts.len()
            );
            Ok(artifacts)
        })
    }

    /// Returns the artifact with `id`, or `None`.
    pub fn get_by_id(&self, id: ArtifactId) -> StorageResult<Option<Artifact>> {
        self.with_repo("artifact_get", |repo| repo.get_artifact(id))
    }

    /// Overwrites all four fields of artifact `id`; no-op when it does not exist.
    pub fn update(&self, id: ArtifactId, fields: &ArtifactFields) -> StorageResult<()> {
        self.with_repo("artifact_update", |repo| {
            let changed = repo.update_artifact(id, fields)?;
            debug!(
                "event=artifact_update module=store status={} artifact_id={id}",
                if changed { "ok" } else { "noop" }
            );
            Ok(())
        })
    }

    /// Deletes artifact `id`; no-op when it does not exist.
    pub fn delete(&self, id: ArtifactId) -> StorageResult<()> {
        self.with_repo("artifact_delete", |repo| {
            let changed = repo.delete_artifact(id)?;
            debug!(
                "event=artifact_delete module=store status={} artifact_id={id}",
                if changed { "ok" } else { "noop" }
            );
            Ok(())
        })
    }

    fn with_repo<T>(
        &self,
        event: &'static str,
        f: impl FnOnce(&SqliteArtifactRepository<'_>) -> StorageResult<T>,
    ) -> StorageResult<T> {
        let started_at = Instant::now();
        let result = open_db(&self.db_path)
            .map_err(StorageError::from)
            .and_then(|conn| {
                let repo = SqliteArtifactRepository::try_new(&conn)?;
                f(&repo)
            });

        match &result {
            Ok(_) => info!(
                "event={event} module=store status=ok duration_ms={}",
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event={event} module=store status=error duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            ),
        }
        result
    }
}
