//! Registration handler
//!
//! POST /api/v1/users/register - Creates a new account

use actix_web::{web, HttpResponse};
use std::sync::Arc;
use streamhub_auth::{NewUser, SessionService};

use super::map_auth_error_to_response;
use super::models::{RegisterRequest, UserInfo};

/// POST /api/v1/users/register
///
/// Creates a new account and returns the sanitized user. Duplicate
/// username or email yields 409; the store's uniqueness constraint is
/// authoritative, there is no separate existence pre-check.
pub async fn register_handler(
    sessions: web::Data<Arc<SessionService>>,
    body: web::Json<RegisterRequest>,
) -> HttpResponse {
    let body = body.into_inner();

    let created = match sessions
        .register(NewUser {
            username: body.username,
            email: body.email,
            full_name: body.full_name,
            password: body.password,
        })
        .await
    {
        Ok(user) => user,
        Err(err) => return map_auth_error_to_response(err),
    };

    HttpResponse::Created().json(UserInfo::from(created))
}
