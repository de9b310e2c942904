//! Token refresh handler
//!
//! POST /api/v1/users/token - Exchanges a refresh token for a new pair

use actix_web::{web, HttpRequest, HttpResponse};
use std::sync::Arc;
use streamhub_auth::cookie::create_token_cookie;
use streamhub_auth::{AuthError, SessionService, ACCESS_COOKIE_NAME, REFRESH_COOKIE_NAME};
use streamhub_configs::AuthSettings;

use super::models::{RefreshRequest, RefreshResponse};
use super::{cookie_config, map_auth_error_to_response};

/// POST /api/v1/users/token
///
/// Unguarded: the refresh token itself is the credential. Accepted from
/// the `refreshToken` cookie or a body field of the same name. On
/// success the stored refresh token is rotated and both cookies are
/// replaced; replaying a previously-rotated token fails.
pub async fn refresh_handler(
    req: HttpRequest,
    sessions: web::Data<Arc<SessionService>>,
    config: web::Data<AuthSettings>,
    body: Option<web::Json<RefreshRequest>>,
) -> HttpResponse {
    let incoming = req
        .cookie(REFRESH_COOKIE_NAME)
        .map(|c| c.value().to_string())
        .or_else(|| body.as_ref().and_then(|b| b.refresh_token.clone()));

    let incoming = match incoming {
        Some(token) if !token.is_empty() => token,
        _ => return map_auth_error_to_response(AuthError::MissingToken),
    };

    let tokens = match sessions.refresh(&incoming).await {
        Ok(tokens) => tokens,
        Err(err) => return map_auth_error_to_response(err),
    };

    let cookie_config = cookie_config(&config);
    let access_cookie = create_token_cookie(
        ACCESS_COOKIE_NAME,
        &tokens.access_token,
        tokens.access_expires_at,
        &cookie_config,
    );
    let refresh_cookie = create_token_cookie(
        REFRESH_COOKIE_NAME,
        &tokens.refresh_token,
        tokens.refresh_expires_at,
        &cookie_config,
    );

    HttpResponse::Ok()
        .cookie(access_cookie)
        .cookie(refresh_cookie)
        .json(RefreshResponse {
            expires_at: tokens.access_expires_at.to_rfc3339(),
            refresh_expires_at: tokens.refresh_expires_at.to_rfc3339(),
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
}
