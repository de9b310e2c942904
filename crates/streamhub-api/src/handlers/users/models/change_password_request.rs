//! Password change request model

use serde::{Deserialize, Serialize};

use super::register_request::validate_password_length;

/// Password change request body
#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(deserialize_with = "validate_password_length")]
    pub old_password: String,
    #[serde(deserialize_with = "validate_password_length")]
    pub new_password: String,
}
