//! Owned SQLite handle shared by the repositories.

use super::DbResult;
use rusqlite::{Connection, Params, Row};

/// The single durable store behind every repository.
///
/// Each `execute` call runs in SQLite autocommit mode, so every mutating
/// statement is its own implicit transaction.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub(super) fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Runs one parameterized statement and returns the affected row count.
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> DbResult<usize> {
        let changed = self.conn.execute(sql, params)?;
        Ok(changed)
    }

    /// Runs one parameterized read and maps every returned row.
    pub fn query<T, P, F>(&self, sql: &str, params: P, mut map_row: F) -> DbResult<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params)?;
        let mut mapped = Vec::new();

        while let Some(row) = rows.next()? {
            mapped.push(map_row(row)?);
        }

        Ok(mapped)
    }

    /// Row id assigned by the most recent successful `INSERT`.
    pub fn last_insert_rowid(&self) -> i64 {
        self.conn.last_insert_rowid()
    }

    /// Borrows the raw connection for schema inspection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}
