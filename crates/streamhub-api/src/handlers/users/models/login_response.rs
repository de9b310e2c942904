//! Login response model

use super::UserInfo;
use serde::Serialize;

/// Login response body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// User information
    pub user: UserInfo,
    /// Access token (also set as HttpOnly cookie)
    pub access_token: String,
    /// Refresh token (also set as HttpOnly cookie; longer-lived)
    pub refresh_token: String,
    /// Access token expiration time in RFC3339 format
    pub expires_at: String,
    /// Refresh token expiration time in RFC3339 format
    pub refresh_expires_at: String,
}
