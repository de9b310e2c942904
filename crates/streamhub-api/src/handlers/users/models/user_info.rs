//! User info model

use serde::Serialize;
use streamhub_auth::CurrentUser;
use streamhub_commons::{UserId, UserName};

/// User info returned in registration, login, and profile responses.
/// Built from the sanitized identity; credential material never reaches
/// this type.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// Unique user identifier
    pub id: UserId,
    /// Username
    pub username: UserName,
    /// Email address
    pub email: String,
    /// Display name
    pub full_name: String,
    /// Creation timestamp in RFC3339 format
    pub created_at: String,
    /// Last update timestamp in RFC3339 format
    pub updated_at: String,
}

impl From<CurrentUser> for UserInfo {
    fn from(user: CurrentUser) -> Self {
        Self {
            id: user.user_id,
            username: user.username,
            email: user.email,
            full_name: user.full_name,
            created_at: rfc3339(user.created_at),
            updated_at: rfc3339(user.updated_at),
        }
    }
}

fn rfc3339(timestamp_millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp_millis)
        .unwrap_or_else(chrono::Utc::now)
        .to_rfc3339()
}
