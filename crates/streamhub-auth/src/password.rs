// Password hashing and validation module

use crate::error::{AuthError, AuthResult};
use bcrypt::{hash, verify, DEFAULT_COST};

/// Bcrypt cost factor for password hashing when none is configured.
pub const BCRYPT_COST: u32 = DEFAULT_COST;

/// Minimum password length
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length (bcrypt has a 72-byte limit)
pub const MAX_PASSWORD_LENGTH: usize = 72;

/// Hash a password using bcrypt.
///
/// Runs on the blocking thread pool since bcrypt is CPU-intensive by
/// design.
///
/// # Arguments
/// * `password` - Plain text password to hash
/// * `cost` - Optional bcrypt cost (defaults to BCRYPT_COST)
///
/// # Errors
/// Returns `AuthError::HashingError` if bcrypt fails
pub async fn hash_password(password: &str, cost: Option<u32>) -> AuthResult<String> {
    let password = password.to_string();
    let cost = cost.unwrap_or(BCRYPT_COST);

    tokio::task::spawn_blocking(move || {
        hash(password, cost).map_err(|e| AuthError::HashingError(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::HashingError(format!("Task join error: {}", e)))?
}

/// Verify a password against a bcrypt hash.
///
/// Runs on the blocking thread pool. The bcrypt comparison itself is
/// constant-time over the digest.
///
/// # Returns
/// `Ok(true)` if the password matches, `Ok(false)` if not
///
/// # Errors
/// Returns `AuthError::HashingError` if bcrypt verification fails
pub async fn verify_password(password: &str, hash: &str) -> AuthResult<bool> {
    let password = password.to_string();
    let hash = hash.to_string();

    tokio::task::spawn_blocking(move || {
        verify(password, &hash).map_err(|e| AuthError::HashingError(e.to_string()))
    })
    .await
    .map_err(|e| AuthError::HashingError(format!("Task join error: {}", e)))?
}

/// Validate that a password meets the policy.
///
/// # Errors
/// Returns `AuthError::WeakPassword` with the specific reason
pub fn validate_password(password: &str) -> AuthResult<()> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at most {} characters",
            MAX_PASSWORD_LENGTH
        )));
    }

    Ok(())
}
