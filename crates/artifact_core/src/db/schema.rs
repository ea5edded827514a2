//! `artifacts` table definition, creation and verification.
//!
//! # Invariants
//! - The DDL matches the on-disk layout bit for bit:
//!   `artifacts(id INTEGER PRIMARY KEY, name TEXT, collection TEXT, category TEXT, location TEXT)`.
//! - A table created by the older layout (no `collection`) is reported as
//!   [`DbError::MissingRequiredColumn`] and left untouched.

use crate::db::{DbError, DbResult};
use log::{error, info, warn};
use rusqlite::Connection;

/// Name of the only table owned by the store.
pub const ARTIFACTS_TABLE: &str = "artifacts";

/// Columns every compatible `artifacts` table must expose.
pub const REQUIRED_COLUMNS: [&str; 5] = ["id", "name", "collection", "category", "location"];

const CREATE_ARTIFACTS_SQL: &str = "CREATE TABLE IF NOT EXISTS artifacts
    (id INTEGER PRIMARY KEY, name TEXT, collection TEXT, category TEXT, location TEXT);";

const DROP_ARTIFACTS_SQL: &str = "DROP TABLE IF EXISTS artifacts;";

/// Creates the `artifacts` table if missing, then verifies its layout.
///
/// Idempotent: an existing compatible table is left as-is.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    if let Err(err) = conn.execute_batch(CREATE_ARTIFACTS_SQL) {
        error!("event=schema_ensure module=db status=error error_code=create_failed error={err}");
        return Err(err.into());
    }

    match verify_schema(conn) {
        Ok(()) => {
            info!("event=schema_ensure module=db status=ok");
            Ok(())
        }
        Err(err) => {
            warn!("event=schema_ensure module=db status=error error_code=incompatible_schema error={err}");
            Err(err)
        }
    }
}

/// Drops and recreates the `artifacts` table, discarding every record.
///
/// Runs in one transaction so a failure leaves the previous table intact.
pub fn reset_schema(conn: &mut Connection) -> DbResult<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(DROP_ARTIFACTS_SQL)?;
    tx.execute_batch(CREATE_ARTIFACTS_SQL)?;
    tx.commit()?;

    warn!("event=schema_reset module=db status=ok");
    Ok(())
}

/// Checks that the `artifacts` table exists with every required column.
pub fn verify_schema(conn: &Connection) -> DbResult<()> {
    if !table_exists(conn, ARTIFACTS_TABLE)? {
        return Err(DbError::MissingRequiredTable(ARTIFACTS_TABLE));
    }

    let columns = table_columns(conn, ARTIFACTS_TABLE)?;
    for column in REQUIRED_COLUMNS {
        if !columns.iter().any(|current| current == column) {
            return Err(DbError::MissingRequiredColumn {
                table: ARTIFACTS_TABLE,
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> DbResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get::<_, String>(1)?);
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::{ensure_schema, reset_schema, verify_schema};
    use crate::db::{open_db_in_memory, DbError};

    #[test]
    fn ensure_schema_is_idempotent() {
        let conn = open_db_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();
        verify_schema(&conn).unwrap();
    }

    #[test]
    fn verify_schema_reports_missing_table() {
        let conn = open_db_in_memory().unwrap();
        let err = verify_schema(&conn).unwrap_err();
        assert!(matches!(err, DbError::MissingRequiredTable("artifacts")));
    }

    #[test]
    fn reset_schema_discards_rows() {
        let mut conn = open_db_in_memory().unwrap();
        ensure_schema(&conn).unwrap();
        conn.execute("INSERT INTO artifacts (name) VALUES ('Vase');", [])
            .unwrap();

        reset_schema(&mut conn).unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM artifacts;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
