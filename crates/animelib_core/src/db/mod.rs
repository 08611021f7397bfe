//! SQLite storage engine for the anime library.
//!
//! # Responsibility
//! - Own the single SQLite connection used by every repository.
//! - Bootstrap the `users`/`anime` schema on open.
//! - Run parameterized statements in autocommit mode.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - Repositories never see a connection whose schema is not ready.
//! - Statements are always bound with parameters, never formatted.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;
mod store;

pub use store::Store;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    IncompatibleSchema {
        table: &'static str,
        missing_column: &'static str,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "database schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::IncompatibleSchema {
                table,
                missing_column,
            } => write!(
                f,
                "existing table `{table}` has no `{missing_column}` column; use a new store file"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::IncompatibleSchema { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
