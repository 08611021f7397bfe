//! Account repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Create user accounts with salted password hashes.
//! - Authenticate username/password pairs against stored hashes.
//!
//! # Invariants
//! - Only Argon2id PHC strings are written to `users.password_hash`.
//! - Usernames are unique; duplicates surface `DuplicateUsername`.
//! - An unknown username authenticates as `false`, never as an error.

use crate::auth::CredentialManager;
use crate::db::{DbError, Store};
use crate::model::user::UserId;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{ffi, params};

/// Repository interface for user accounts.
pub trait AccountRepository {
    /// Registers `username` with a freshly salted hash of `password`.
    fn create_user(&self, username: &str, password: &str) -> RepoResult<UserId>;
    /// Returns whether `password` matches the stored hash for `username`.
    fn authenticate(&self, username: &str, password: &str) -> RepoResult<bool>;
}

/// SQLite-backed account repository.
pub struct SqliteAccountRepository<'store> {
    store: &'store Store,
    credentials: CredentialManager,
}

impl<'store> SqliteAccountRepository<'store> {
    pub fn new(store: &'store Store) -> Self {
        Self {
            store,
            credentials: CredentialManager::new(),
        }
    }
}

impl AccountRepository for SqliteAccountRepository<'_> {
    fn create_user(&self, username: &str, password: &str) -> RepoResult<UserId> {
        if username.trim().is_empty() {
            return Err(RepoError::InvalidInput("username must not be empty"));
        }
        if password.is_empty() {
            return Err(RepoError::InvalidInput("password must not be empty"));
        }

        let password_hash = self.credentials.hash(password)?;

        let inserted = self.store.execute(
            "INSERT INTO users (username, password_hash) VALUES (?1, ?2);",
            params![username, password_hash],
        );

        match inserted {
            Ok(_) => Ok(self.store.last_insert_rowid()),
            Err(err) if is_unique_violation(&err) => {
                Err(RepoError::DuplicateUsername(username.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn authenticate(&self, username: &str, password: &str) -> RepoResult<bool> {
        let hashes = self.store.query(
            "SELECT password_hash FROM users WHERE username = ?1 LIMIT 1;",
            [username],
            |row| row.get::<_, String>(0),
        )?;

        let Some(stored_hash) = hashes.first() else {
            return Ok(false);
        };

        Ok(self.credentials.verify(password, stored_hash))
    }
}

fn is_unique_violation(err: &DbError) -> bool {
    matches!(
        err,
        DbError::Sqlite(rusqlite::Error::SqliteFailure(failure, _))
            if failure.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
