//! PIN hashing
//!
//! Argon2 with a per-PIN random salt. Verification is constant-time
//! inside the argon2 crate.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::transfer::error::TransferError;

/// Hash a PIN into a PHC-format string for storage
pub fn hash_pin(pin: &str) -> Result<String, TransferError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(pin.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| TransferError::StorageFailure(format!("PIN hashing failed: {}", e)))
}

/// Verify a PIN against a stored PHC hash
///
/// A malformed stored hash verifies as false rather than erroring:
/// the caller only ever learns "PIN accepted" or "PIN rejected".
pub fn verify_pin(pin: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        tracing::error!("Stored PIN hash is not a valid PHC string");
        return false;
    };
    Argon2::default()
        .verify_password(pin.as_bytes(), &parsed)
        .is_ok()
}
