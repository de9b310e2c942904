//! Current user handler
//!
//! GET /api/v1/users/me - Returns the currently authenticated user

use actix_web::HttpResponse;
use streamhub_auth::CurrentUser;

use super::models::UserInfo;

/// GET /api/v1/users/me
///
/// The guard has already verified the access token and attached the
/// sanitized identity; this just shapes the response.
pub async fn me_handler(user: CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(UserInfo::from(user))
}
