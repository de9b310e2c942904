//! Token refresh request model

use serde::{Deserialize, Serialize};

/// Refresh request body. The token may instead arrive in the
/// `refreshToken` cookie, in which case the body is empty.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}
