//! Domain model for catalog entries and user accounts.
//!
//! # Responsibility
//! - Define the value objects passed between repositories and the session.
//!
//! # Invariants
//! - Persisted anime records always pass `AnimeRecord::validate()`.
//! - Identity is the store-assigned integer id.

pub mod anime;
pub mod user;
