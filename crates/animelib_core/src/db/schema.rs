//! Schema bootstrap for the `users` and `anime` tables.
//!
//! # Invariants
//! - `ensure_schema` is idempotent: tables use `CREATE TABLE IF NOT EXISTS`.
//! - A store stamped with a newer `user_version` is rejected untouched.
//! - An unstamped store whose existing tables lack required columns is
//!   rejected untouched.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

const SCHEMA_SQL: &str = include_str!("schema.sql");

const REQUIRED_COLUMNS: &[(&str, &[&str])] = &[
    ("users", &["id", "username", "password_hash"]),
    ("anime", &["id", "title", "genre", "episodes"]),
];

/// Schema version written by this binary.
pub const SCHEMA_VERSION: u32 = 1;

/// Creates missing tables and stamps the schema version.
pub fn ensure_schema(conn: &mut Connection) -> DbResult<()> {
    let current_version = current_user_version(conn)?;
    if current_version > SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: SCHEMA_VERSION,
        });
    }

    if current_version == 0 {
        check_existing_tables(conn)?;
    }

    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    if current_version < SCHEMA_VERSION {
        tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
    }
    tx.commit()?;

    Ok(())
}

/// Reads `PRAGMA user_version` from the connection.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

/// Rejects pre-existing tables that `CREATE TABLE IF NOT EXISTS` would keep
/// with the wrong shape.
fn check_existing_tables(conn: &Connection) -> DbResult<()> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;

    for &(table, required) in REQUIRED_COLUMNS {
        let columns = stmt
            .query_map([table], |row| row.get::<_, String>(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        if columns.is_empty() {
            continue;
        }

        if let Some(&missing) = required
            .iter()
            .find(|&&column| !columns.iter().any(|name| name == column))
        {
            return Err(DbError::IncompatibleSchema {
                table,
                missing_column: missing,
            });
        }
    }

    Ok(())
}
