//! Password hashing
//!
//! Passwords are length-checked, then hashed with bcrypt. The plaintext is
//! never stored and never recoverable from the hash.

use thiserror::Error;

use crate::validation::{validate_password, ValidationError};

pub use bcrypt::DEFAULT_COST;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("Password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Validate a raw password and hash it with a fresh salt
pub fn hash_password(raw: &str, cost: u32) -> Result<String, PasswordError> {
    let raw = validate_password(raw)?;
    Ok(bcrypt::hash(raw, cost)?)
}

/// Compare a candidate against a stored hash.
///
/// Returns `false` when no hash is stored or the stored value is not a
/// readable bcrypt hash.
pub fn check_password(stored_hash: Option<&str>, candidate: &str) -> bool {
    match stored_hash {
        Some(hash) => bcrypt::verify(candidate, hash).unwrap_or(false),
        None => false,
    }
}
