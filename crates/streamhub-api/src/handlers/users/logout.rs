//! Logout handler
//!
//! POST /api/v1/users/logout - Invalidates the session and clears cookies

use actix_web::{web, HttpResponse};
use std::sync::Arc;
use streamhub_auth::cookie::create_expired_cookie;
use streamhub_auth::{CurrentUser, SessionService, ACCESS_COOKIE_NAME, REFRESH_COOKIE_NAME};
use streamhub_configs::AuthSettings;

use super::{cookie_config, map_auth_error_to_response};

/// POST /api/v1/users/logout
///
/// Clears the persisted refresh token and expires both token cookies.
/// Idempotent.
pub async fn logout_handler(
    user: CurrentUser,
    sessions: web::Data<Arc<SessionService>>,
    config: web::Data<AuthSettings>,
) -> HttpResponse {
    if let Err(err) = sessions.logout(&user.user_id).await {
        return map_auth_error_to_response(err);
    }

    let cookie_config = cookie_config(&config);
    HttpResponse::Ok()
        .cookie(create_expired_cookie(ACCESS_COOKIE_NAME, &cookie_config))
        .cookie(create_expired_cookie(REFRESH_COOKIE_NAME, &cookie_config))
        .json(serde_json::json!({
            "message": "Logged out successfully"
        }))
}
