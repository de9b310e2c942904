//! Request-scoped authenticated identity.
//!
//! The auth middleware verifies the access token, loads the user, and
//! inserts a `CurrentUser` into the request extensions. Handlers receive
//! it as an extractor parameter; it lives for the duration of one
//! request.

use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::{FromRequest, HttpMessage, HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;
use std::future::{ready, Ready};
use streamhub_commons::{User, UserId, UserName};

/// The verified user attached to a request, with credential material
/// (`password_hash`, `refresh_token`) stripped.
#[derive(Debug, Clone, Serialize)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub username: UserName,
    pub email: String,
    pub full_name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Rejection returned when a handler expects `CurrentUser` but the
/// request never passed the auth middleware.
#[derive(Debug)]
pub struct MissingIdentity;

impl fmt::Display for MissingIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no authenticated identity attached to request")
    }
}

impl ResponseError for MissingIdentity {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::Unauthorized().json(serde_json::json!({
            "error": "unauthorized",
            "message": "Invalid or missing access token"
        }))
    }
}

impl FromRequest for CurrentUser {
    type Error = MissingIdentity;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let user = req.extensions().get::<CurrentUser>().cloned();
        ready(user.ok_or(MissingIdentity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_user_strips_credentials() {
        let user = User::new(
            UserId::new("u1"),
            UserName::new("alice"),
            "alice@example.com",
            "Alice Example",
            "$2b$12$hash",
        );
        let current = CurrentUser::from(&user);
        assert_eq!(current.user_id, user.user_id);
        assert_eq!(current.username, user.username);

        let json = serde_json::to_value(&current).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("refresh_token").is_none());
    }
}
