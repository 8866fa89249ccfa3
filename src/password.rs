//! Password hashing for stored credentials.
//! Used by: handlers::login, handlers::register, handlers::users.

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::error::{Error, Result};

pub fn hash_password(password: &str) -> Result<String> {
    hash(password, DEFAULT_COST).map_err(|e| Error::Password(e.to_string()))
}

/// A hash that fails to parse counts as a mismatch, never a panic.
pub fn verify_password(password: &str, hashed: &str) -> bool {
    verify(password, hashed).unwrap_or(false)
}
