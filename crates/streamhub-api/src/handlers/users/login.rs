//! Login handler
//!
//! POST /api/v1/users/login - Authenticates a user and opens a session

use actix_web::{web, HttpResponse};
use std::sync::Arc;
use streamhub_auth::cookie::create_token_cookie;
use streamhub_auth::{SessionService, ACCESS_COOKIE_NAME, REFRESH_COOKIE_NAME};
use streamhub_configs::AuthSettings;

use super::models::{AuthErrorResponse, LoginRequest, LoginResponse, UserInfo};
use super::{cookie_config, map_auth_error_to_response};

/// POST /api/v1/users/login
///
/// Authenticates by username or email plus password, sets both token
/// cookies, and echoes the pair in the body. Unknown accounts and wrong
/// passwords produce the same response.
pub async fn login_handler(
    sessions: web::Data<Arc<SessionService>>,
    config: web::Data<AuthSettings>,
    body: web::Json<LoginRequest>,
) -> HttpResponse {
    let identifier = match body.identifier() {
        Some(identifier) => identifier.to_string(),
        None => {
            return HttpResponse::BadRequest().json(AuthErrorResponse::new(
                "validation_error",
                "Must provide a username or email",
            ));
        },
    };

    let outcome = match sessions.login(&identifier, &body.password).await {
        Ok(outcome) => outcome,
        Err(err) => return map_auth_error_to_response(err),
    };

    let cookie_config = cookie_config(&config);
    let access_cookie = create_token_cookie(
        ACCESS_COOKIE_NAME,
        &outcome.tokens.access_token,
        outcome.tokens.access_expires_at,
        &cookie_config,
    );
    let refresh_cookie = create_token_cookie(
        REFRESH_COOKIE_NAME,
        &outcome.tokens.refresh_token,
        outcome.tokens.refresh_expires_at,
        &cookie_config,
    );

    HttpResponse::Ok()
        .cookie(access_cookie)
        .cookie(refresh_cookie)
        .json(LoginResponse {
            user: UserInfo::from(outcome.user),
            expires_at: outcome.tokens.access_expires_at.to_rfc3339(),
            refresh_expires_at: outcome.tokens.refresh_expires_at.to_rfc3339(),
            access_token: outcome.tokens.access_token,
            refresh_token: outcome.tokens.refresh_token,
        })
}
