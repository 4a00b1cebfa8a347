//! Argon2 password hashing.
//!
//! Hashes are stored as PHC strings (`$argon2id$v=19$...`) so parameters and salt travel
//! with the hash.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::Rng;

use crate::server::error::{internal::InternalError, AppError};

/// Hashes a password with Argon2id and a random 16-byte salt.
///
/// Runs on the blocking thread pool.
///
/// # Arguments
/// - `password` - Plain-text password
///
/// # Returns
/// - `Ok(String)` - PHC-formatted hash
/// - `Err(AppError::InternalErr(PasswordHash))` - Hashing failed
/// - `Err(AppError::InternalError)` - The blocking task panicked or was cancelled
pub async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_string();

    tokio::task::spawn_blocking(move || hash_blocking(&password))
        .await
        .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {}", e)))?
}

/// Checks a password against a stored PHC hash on the blocking thread pool.
///
/// A stored value that is not a valid PHC string never verifies.
pub async fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    let password = password.to_string();
    let stored_hash = stored_hash.to_string();

    tokio::task::spawn_blocking(move || verify_blocking(&password, &stored_hash))
        .await
        .map_err(|e| AppError::InternalError(format!("Password verification task failed: {}", e)))
}

fn hash_blocking(password: &str) -> Result<String, AppError> {
    let mut salt_bytes = [0u8; 16];
    rand::rng().fill(&mut salt_bytes);

    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| InternalError::PasswordHash(e.to_string()))?;

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| InternalError::PasswordHash(e.to_string()))?;

    Ok(hash.to_string())
}

fn verify_blocking(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        tracing::warn!("Stored password hash is not a valid PHC string");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
