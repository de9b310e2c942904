//! Login request model

use serde::{Deserialize, Serialize};

use super::register_request::validate_password_length;

/// Login request body. Either `username` or `email` identifies the
/// account; both may be present, username wins.
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(deserialize_with = "validate_password_length")]
    pub password: String,
}

impl LoginRequest {
    /// The login identifier: username if present and non-empty,
    /// otherwise email.
    pub fn identifier(&self) -> Option<&str> {
        self.username
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| self.email.as_deref().filter(|s| !s.trim().is_empty()))
    }
}
