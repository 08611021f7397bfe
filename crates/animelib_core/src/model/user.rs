//! User account identity.

/// Store-assigned identifier of a `users` row.
pub type UserId = i64;
