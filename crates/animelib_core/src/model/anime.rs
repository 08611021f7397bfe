//! Anime catalog record.
//!
//! # Responsibility
//! - Define the title/genre/episode value object used for display and search.
//! - Validate record invariants before persistence.
//!
//! # Invariants
//! - `title` and `genre` are non-empty after trimming whitespace.
//! - `episode_count` is non-negative by construction (`u32`).

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned identifier of an `anime` row.
pub type AnimeId = i64;

/// Validation failures for `AnimeRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimeValidationError {
    EmptyTitle,
    EmptyGenre,
}

impl Display for AnimeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "anime title must not be empty"),
            Self::EmptyGenre => write!(f, "anime genre must not be empty"),
        }
    }
}

impl Error for AnimeValidationError {}

/// One catalog entry without its storage identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimeRecord {
    pub title: String,
    pub genre: String,
    /// Stored in the `episodes` column.
    pub episode_count: u32,
}

impl AnimeRecord {
    pub fn new(title: impl Into<String>, genre: impl Into<String>, episode_count: u32) -> Self {
        Self {
            title: title.into(),
            genre: genre.into(),
            episode_count,
        }
    }

    /// Checks the record invariants enforced on every write.
    pub fn validate(&self) -> Result<(), AnimeValidationError> {
        if self.title.trim().is_empty() {
            return Err(AnimeValidationError::EmptyTitle);
        }
        if self.genre.trim().is_empty() {
            return Err(AnimeValidationError::EmptyGenre);
        }
        Ok(())
    }
}

impl Display for AnimeRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} - {} episodes",
            self.title, self.genre, self.episode_count
        )
    }
}

/// A persisted record together with its row id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimeEntry {
    pub id: AnimeId,
    pub record: AnimeRecord,
}

impl Display for AnimeEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.id, self.record)
    }
}
