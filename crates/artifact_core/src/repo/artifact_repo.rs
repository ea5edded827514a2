//! Artifact repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and keyword search over the `artifacts` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Every statement is parameterized; user text never becomes SQL.
//! - Keyword search matches the keyword literally as a substring with ASCII
//!   case folding. No character in user input has wildcard meaning, and
//!   keyword length is bounded only by SQLite's string limit.
//! - Update and delete of an unknown id change nothing and are not errors.

use crate::db::schema::verify_schema;
use crate::db::DbError;
use crate::model::artifact::{Artifact, ArtifactFields, ArtifactId};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ARTIFACT_SELECT_SQL: &str = "SELECT
    id,
    name,
    collection,
    category,
    location
FROM artifacts";

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage failure for artifact persistence and query operations.
#[derive(Debug)]
pub enum StorageError {
    /// Connection, schema or query failure.
    Db(DbError),
    /// Persisted row cannot be decoded into an [`Artifact`].
    InvalidData(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted artifact data: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::FromSqlConversionFailure(index, _, err) => {
                Self::InvalidData(format!("column {index}: {err}"))
            }
            rusqlite::Error::InvalidColumnType(index, name, kind) => Self::InvalidData(format!(
                "column {index} (`{name}`) has unexpected type {kind}"
            )),
            other => Self::Db(DbError::Sqlite(other)),
        }
    }
}

/// Repository interface for artifact persistence.
pub trait ArtifactRepository {
    /// Inserts one row and returns the store-assigned id.
    fn create_artifact(&self, fields: &ArtifactFields) -> StorageResult<ArtifactId>;
    /// Gets one artifact by id.
    fn get_artifact(&self, id: ArtifactId) -> StorageResult<Option<Artifact>>;
    /// Lists artifacts whose fields contain `keyword`, in insertion order.
    fn find_by_keyword(&self, keyword: &str) -> StorageResult<Vec<Artifact>>;
    /// Overwrites all four fields. Returns whether a row matched.
    fn update_artifact(&self, id: ArtifactId, fields: &ArtifactFields) -> StorageResult<bool>;
    /// Hard-deletes one row. Returns whether a row matched.
    fn delete_artifact(&self, id: ArtifactId) -> StorageResult<bool>;
}

/// SQLite-backed artifact repository.
pub struct SqliteArtifactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteArtifactRepository<'conn> {
    /// Constructs a repository from a connection whose schema is ready.
    ///
    /// Rejects connections without a compatible `artifacts` table, so an
    /// older three-column database fails here rather than mid-query.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        verify_schema(conn)?;
        Ok(Self { conn })
    }
}

impl ArtifactRepository for SqliteArtifactRepository<'_> {
    fn create_artifact(&self, fields: &ArtifactFields) -> StorageResult<ArtifactId> {
        self.conn.execute(
            "INSERT INTO artifacts (name, collection, category, location)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                fields.name.as_deref(),
                fields.collection.as_deref(),
                fields.category.as_deref(),
                fields.location.as_deref(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_artifact(&self, id: ArtifactId) -> StorageResult<Option<Artifact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ARTIFACT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_artifact_row(row)?));
        }

        Ok(None)
    }

    fn find_by_keyword(&self, keyword: &str) -> StorageResult<Vec<Artifact>> {
        // instr over NULL yields NULL, so the empty keyword takes the unfiltered
        // path to keep rows whose fields are all absent.
        let mut artifacts = Vec::new();
        if keyword.is_empty() {
            let mut stmt = self
                .conn
                .prepare(&format!("{ARTIFACT_SELECT_SQL} ORDER BY id ASC;"))?;
            let mut rows = stmt.query([])?;
            while let Some(row) = rows.next()? {
                artifacts.push(parse_artifact_row(row)?);
            }
            return Ok(artifacts);
        }

        let mut stmt = self.conn.prepare(&format!(
            "{ARTIFACT_SELECT_SQL}
             WHERE instr(lower(name), lower(?1)) > 0
                OR instr(lower(collection), lower(?1)) > 0
                OR instr(lower(category), lower(?1)) > 0
                OR instr(lower(location), lower(?1)) > 0
             ORDER BY id ASC;"
        ))?;
        let mut rows = stmt.query([keyword])?;
        while let Some(row) = rows.next()? {
            artifacts.push(parse_artifact_row(row)?);
        }

        Ok(artifacts)
    }

    fn update_artifact(&self, id: ArtifactId, fields: &ArtifactFields) -> StorageResult<bool> {
        let changed = self.conn.execute(
            "UPDATE artifacts
             SET
                name = ?1,
                collection = ?2,
                category = ?3,
                location = ?4
             WHERE id = ?5;",
            params![
                fields.name.as_deref(),
                fields.collection.as_deref(),
                fields.category.as_deref(),
                fields.location.as_deref(),
                id,
            ],
        )?;

        Ok(changed > 0)
    }

    fn delete_artifact(&self, id: ArtifactId) -> StorageResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM artifacts WHERE id = ?1;", [id])?;
        Ok(changed > 0)
    }
}

fn parse_artifact_row(row: &Row<'_>) -> StorageResult<Artifact> {
    Ok(Artifact {
        id: row.get("id")?,
        fields: ArtifactFields {
            name: row.get("name")?,
            collection: row.get("collection")?,
            category: row.get("category")?,
            location: row.get("location")?,
        },
    })
}
