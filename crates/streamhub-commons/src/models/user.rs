//! Persisted user record.
//!
//! The record owns the credential material for one account: the bcrypt
//! password hash and the single currently-valid refresh token. Neither
//! field implements any outward serialization; responses are built from
//! sanitized view types instead.

use super::{UserId, UserName};

/// A registered user account.
///
/// Invariant: at most one live refresh token per user at any time.
/// `refresh_token` is `None` when the user is logged out; a new login or
/// a token refresh overwrites the stored value, invalidating the prior
/// token.
#[derive(Debug, Clone)]
pub struct User {
    /// Opaque unique identifier.
    pub user_id: UserId,
    /// Unique username, stored lowercased.
    pub username: UserName,
    /// Unique email address, stored lowercased.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Bcrypt hash of the password. Never leaves the process.
    pub password_hash: String,
    /// The single currently-valid refresh token, or `None` if logged out.
    pub refresh_token: Option<String>,
    /// Creation timestamp (milliseconds since the Unix epoch).
    pub created_at: i64,
    /// Last update timestamp (milliseconds since the Unix epoch).
    pub updated_at: i64,
}

impl User {
    /// Create a new user record with fresh timestamps and no session.
    pub fn new(
        user_id: UserId,
        username: UserName,
        email: impl Into<String>,
        full_name: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            user_id,
            username,
            email: email.into(),
            full_name: full_name.into(),
            password_hash: password_hash.into(),
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial update and refresh `updated_at`.
    pub fn apply_patch(&mut self, patch: UserPatch) {
        if let Some(full_name) = patch.full_name {
            self.full_name = full_name;
        }
        if let Some(password_hash) = patch.password_hash {
            self.password_hash = password_hash;
        }
        if let Some(refresh_token) = patch.refresh_token {
            self.refresh_token = refresh_token;
        }
        self.updated_at = chrono::Utc::now().timestamp_millis();
    }
}

/// Partial update for a user record.
///
/// `refresh_token` is doubly optional: the outer `Option` is "change this
/// field or not", the inner is the new value, where `None` clears the
/// stored token (logout).
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub full_name: Option<String>,
    pub password_hash: Option<String>,
    pub refresh_token: Option<Option<String>>,
}
