//! Error taxonomy for authentication flows.
//!
//! Domain errors (credentials, duplicates, token verification, reuse
//! detection, input validation) are returned to the caller and mapped to
//! HTTP statuses at the API boundary. Faults (signing, hashing, storage)
//! are logged there and surface as a generic internal error.

use thiserror::Error;

/// Result alias for authentication operations.
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Wrong password for an existing account.
    #[error("invalid user credentials")]
    InvalidCredentials,

    /// No account matches the identifier or subject id.
    #[error("user not found: {0}")]
    UserNotFound(String),

    /// Username or email already taken.
    #[error("user with username or email already exists")]
    DuplicateUser,

    /// A required request field was empty or absent.
    #[error("{0} is required")]
    MissingField(String),

    /// Password rejected by the password policy.
    #[error("{0}")]
    WeakPassword(String),

    /// No bearer token present where one is required.
    #[error("missing authentication token")]
    MissingToken,

    /// Token string could not be decoded.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// Token expired.
    #[error("token has expired")]
    TokenExpired,

    /// Signature does not match the secret for the expected purpose.
    /// Cross-purpose tokens fail here since each purpose signs with an
    /// independent secret.
    #[error("invalid token signature")]
    InvalidSignature,

    /// Incoming refresh token is cryptographically valid but is not the
    /// currently-stored one: it was already rotated away or revoked.
    #[error("refresh token is expired or has already been used")]
    TokenReused,

    /// Token encoding failed. Fault.
    #[error("token signing error: {0}")]
    SigningError(String),

    /// Bcrypt failure. Fault.
    #[error("hashing error: {0}")]
    HashingError(String),

    /// Storage failure. Fault.
    #[error("database error: {0}")]
    DatabaseError(String),
}

impl AuthError {
    /// True for unexpected faults that should surface as a generic
    /// internal error rather than a domain response.
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            AuthError::SigningError(_) | AuthError::HashingError(_) | AuthError::DatabaseError(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_classification() {
        assert!(AuthError::SigningError("boom".into()).is_fault());
        assert!(AuthError::DatabaseError("down".into()).is_fault());
        assert!(!AuthError::InvalidCredentials.is_fault());
        assert!(!AuthError::TokenReused.is_fault());
    }
}
