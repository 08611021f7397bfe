//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from the session loop.
//!
//! # Invariants
//! - Catalog writes enforce `AnimeRecord::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateUsername`)
//!   in addition to DB transport errors.

pub mod account_repo;
pub mod catalog_repo;
mod error;

pub use error::{RepoError, RepoResult};
