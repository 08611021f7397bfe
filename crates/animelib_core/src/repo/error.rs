use crate::auth::AuthError;
use crate::db::DbError;
use crate::model::anime::{AnimeId, AnimeValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for account and catalog operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(AnimeValidationError),
    Db(DbError),
    Auth(AuthError),
    NotFound(AnimeId),
    DuplicateUsername(String),
    InvalidInput(&'static str),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Auth(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "anime not found: {id}"),
            Self::DuplicateUsername(username) => {
                write!(f, "username `{username}` is already taken")
            }
            Self::InvalidInput(message) => write!(f, "{message}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Auth(err) => Some(err),
            Self::NotFound(_)
            | Self::DuplicateUsername(_)
            | Self::InvalidInput(_)
            | Self::InvalidData(_) => None,
        }
    }
}

impl From<AnimeValidationError> for RepoError {
    fn from(value: AnimeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<AuthError> for RepoError {
    fn from(value: AuthError) -> Self {
        Self::Auth(value)
    }
}
