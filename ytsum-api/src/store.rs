//! In-memory user store
//!
//! Username -> Argon2id PHC hash, created empty at startup and lost on
//! restart. Demo-grade: login only reports success, no session is issued.
//!
//! The map lock is held only for lookups and inserts. Hashing and
//! verification run on the blocking pool, outside the lock; `register`
//! re-checks the username under the lock before inserting, so concurrent
//! registrations of one name produce exactly one winner.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use ytsum_common::api::auth::{hash_password, verify_password};

/// Auth failure kinds
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("User already exists")]
    AlreadyExists,

    #[error("User not found")]
    NotFound,

    #[error("Invalid password")]
    WrongPassword,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ytsum_common::Error> for AuthError {
    fn from(err: ytsum_common::Error) -> Self {
        AuthError::Internal(err.to_string())
    }
}

/// Process-lifetime user map
#[derive(Clone, Default)]
pub struct UserStore {
    users: Arc<Mutex<HashMap<String, String>>>,
}

fn validate_credentials(username: &str, password: &str) -> Result<(), AuthError> {
    if username.trim().is_empty() || password.is_empty() {
        return Err(AuthError::InvalidInput(
            "Username and password are required".to_string(),
        ));
    }
    Ok(())
}

/// Run a CPU-heavy hashing closure off the async worker threads
async fn run_blocking<T, F>(f: F) -> Result<T, AuthError>
where
    F: FnOnce() -> ytsum_common::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AuthError::Internal(format!("Hashing task failed: {}", e)))?
        .map_err(AuthError::from)
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave the map half-updated
    // (single insert), so a poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.users.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of registered users
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn contains(&self, username: &str) -> bool {
        self.lock().contains_key(username)
    }

    /// Register a new user
    ///
    /// Fails with `AlreadyExists` if the username is taken, whatever the
    /// password.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        validate_credentials(username, password)?;

        // Skip the expensive hash when the name is obviously taken
        if self.contains(username) {
            return Err(AuthError::AlreadyExists);
        }

        let password = password.to_string();
        let hash = run_blocking(move || hash_password(&password)).await?;

        match self.lock().entry(username.to_string()) {
            Entry::Occupied(_) => Err(AuthError::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(hash);
                Ok(())
            }
        }
    }

    /// Check a username/password pair
    pub async fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        validate_credentials(username, password)?;

        let stored = self.lock().get(username).cloned().ok_or(AuthError::NotFound)?;

        let password = password.to_string();
        let matches = run_blocking(move || verify_password(&password, &stored)).await?;

        if matches {
            Ok(())
        } else {
            Err(AuthError::WrongPassword)
        }
    }
}
