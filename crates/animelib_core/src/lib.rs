//! Core logic for the anime library: storage, credentials, repositories and
//! the interactive session loop.

pub mod auth;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod session;

pub use auth::{AuthError, AuthResult, CredentialManager};
pub use config::{AppConfig, ConfigError};
pub use db::{DbError, DbResult, Store};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::anime::{AnimeEntry, AnimeId, AnimeRecord, AnimeValidationError};
pub use model::user::UserId;
pub use repo::account_repo::{AccountRepository, SqliteAccountRepository};
pub use repo::catalog_repo::{CatalogRepository, SqliteCatalogRepository};
pub use repo::{RepoError, RepoResult};
pub use session::{Session, SessionError, SessionResult, SessionState};

