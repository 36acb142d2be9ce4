//! Password hashing and verification
//!
//! Argon2id with a random 16-byte salt per password, stored as a PHC string
//! (`$argon2id$v=19$...`). Plaintext passwords are never kept.
//!
//! # Pure Functions
//!
//! No HTTP framework or store dependencies. Hashing is CPU-bound; async
//! callers should run it on a blocking thread.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::RngCore;

use crate::{Error, Result};

/// Salt length in bytes
const SALT_LEN: usize = 16;

/// Hash a password with Argon2id and a fresh random salt
///
/// # Examples
///
/// ```
/// use ytsum_common::api::auth::{hash_password, verify_password};
///
/// let hash = hash_password("hunter2").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// assert!(verify_password("hunter2", &hash).unwrap());
/// ```
pub fn hash_password(password: &str) -> Result<String> {
    let mut salt_bytes = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt_bytes);

    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| Error::Internal(format!("Salt encoding failed: {}", e)))?;

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();

    Ok(hash)
}

/// Verify a password against a stored PHC hash
///
/// Returns `Ok(false)` on mismatch; `Err` only when the stored hash is
/// unparseable or the backend fails.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(password_hash)
        .map_err(|e| Error::Internal(format!("Invalid password hash format: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(Error::Internal(format!("Password verification failed: {}", e))),
    }
}
