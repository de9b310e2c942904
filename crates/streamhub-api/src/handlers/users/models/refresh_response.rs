//! Token refresh response model

use serde::Serialize;

/// Refresh response body: the freshly rotated token pair.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    /// New access token (also set as HttpOnly cookie)
    pub access_token: String,
    /// New refresh token (also set as HttpOnly cookie)
    pub refresh_token: String,
    /// Access token expiration time in RFC3339 format
    pub expires_at: String,
    /// Refresh token expiration time in RFC3339 format
    pub refresh_expires_at: String,
}
