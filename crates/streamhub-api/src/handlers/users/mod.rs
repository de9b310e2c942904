//! User endpoints
//!
//! Provides registration, login, logout, token refresh, current user,
//! and password change handlers. Tokens travel as HttpOnly cookies and
//! are echoed in JSON bodies.
//!
//! ## Endpoints
//! - POST /api/v1/users/register - Create a new account
//! - POST /api/v1/users/login - Authenticate and open a session
//! - POST /api/v1/users/logout - Close the session (guarded)
//! - POST /api/v1/users/token - Rotate the refresh token (unguarded;
//!   the token itself is the credential)
//! - GET  /api/v1/users/me - Current user info (guarded)
//! - POST /api/v1/users/change-password - Change password (guarded)

pub mod models;

mod change_password;
mod login;
mod logout;
mod me;
mod refresh;
mod register;

pub use change_password::change_password_handler;
pub use login::login_handler;
pub use logout::logout_handler;
pub use me::me_handler;
pub use refresh::refresh_handler;
pub use register::register_handler;

use actix_web::HttpResponse;
use models::AuthErrorResponse;
use streamhub_auth::{AuthError, CookieConfig};
use streamhub_configs::AuthSettings;

/// Map authentication errors to HTTP responses.
///
/// Credential failures use one generic message so the response never
/// reveals whether the account exists (prevents user enumeration).
/// Token failures keep their reason as message text only; the status is
/// uniformly 401. Faults are logged and surface as a generic 500.
pub(crate) fn map_auth_error_to_response(err: AuthError) -> HttpResponse {
    match err {
        AuthError::InvalidCredentials | AuthError::UserNotFound(_) => HttpResponse::Unauthorized()
            .json(AuthErrorResponse::new(
                "unauthorized",
                "Invalid username or password",
            )),
        AuthError::DuplicateUser => HttpResponse::Conflict().json(AuthErrorResponse::new(
            "conflict",
            "User with username or email already exists",
        )),
        AuthError::MissingField(_) | AuthError::WeakPassword(_) => HttpResponse::BadRequest()
            .json(AuthErrorResponse::new("validation_error", err.to_string())),
        AuthError::MissingToken
        | AuthError::MalformedToken(_)
        | AuthError::TokenExpired
        | AuthError::InvalidSignature
        | AuthError::TokenReused => HttpResponse::Unauthorized()
            .json(AuthErrorResponse::new("unauthorized", err.to_string())),
        AuthError::SigningError(_) | AuthError::HashingError(_) | AuthError::DatabaseError(_) => {
            log::error!("internal auth fault: {}", err);
            HttpResponse::InternalServerError().json(AuthErrorResponse::new(
                "internal_error",
                "Authentication failed",
            ))
        },
    }
}

/// Cookie settings derived from the auth configuration.
pub(crate) fn cookie_config(settings: &AuthSettings) -> CookieConfig {
    CookieConfig {
        secure: settings.cookie_secure,
        ..Default::default()
    }
}
