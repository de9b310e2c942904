//! Password change handler
//!
//! POST /api/v1/users/change-password - Changes the account password

use actix_web::{web, HttpResponse};
use std::sync::Arc;
use streamhub_auth::{AuthError, CurrentUser, SessionService};

use super::map_auth_error_to_response;
use super::models::{AuthErrorResponse, ChangePasswordRequest};

/// POST /api/v1/users/change-password
///
/// Verifies the old password before persisting the new hash. The
/// current session stays valid; no re-login is forced.
pub async fn change_password_handler(
    user: CurrentUser,
    sessions: web::Data<Arc<SessionService>>,
    body: web::Json<ChangePasswordRequest>,
) -> HttpResponse {
    match sessions
        .change_password(&user.user_id, &body.old_password, &body.new_password)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "message": "Password changed successfully"
        })),
        Err(AuthError::InvalidCredentials) => HttpResponse::BadRequest().json(
            AuthErrorResponse::new("validation_error", "Invalid old password"),
        ),
        Err(err) => map_auth_error_to_response(err),
    }
}
