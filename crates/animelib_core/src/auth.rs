//! Salted password hashing and verification.
//!
//! # Responsibility
//! - Derive Argon2id PHC strings from plaintext passwords.
//! - Verify candidate passwords against stored PHC strings.
//!
//! # Invariants
//! - Every `hash` call uses a fresh random salt.
//! - Digest comparison is constant-time (delegated to `argon2`).
//! - Plaintext passwords and hashes are never logged.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug)]
pub enum AuthError {
    Hash(argon2::password_hash::Error),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hash(err) => write!(f, "password hashing failed: {err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Hash(err) => Some(err),
        }
    }
}

impl From<argon2::password_hash::Error> for AuthError {
    fn from(value: argon2::password_hash::Error) -> Self {
        Self::Hash(value)
    }
}

/// Stateless wrapper around the Argon2id parameters.
#[derive(Default)]
pub struct CredentialManager {
    hasher: Argon2<'static>,
}

impl CredentialManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hashes `password` with a fresh salt and returns the PHC string.
    pub fn hash(&self, password: &str) -> AuthResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.hasher.hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Returns whether `password` matches `stored_hash`.
    ///
    /// A malformed `stored_hash` is treated as a mismatch.
    pub fn verify(&self, password: &str, stored_hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(stored_hash) else {
            return false;
        };
        self.hasher
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}
