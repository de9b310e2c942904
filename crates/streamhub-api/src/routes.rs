//! API routes configuration
//!
//! Wires all HTTP routes for the streamhub API.
//!
//! All endpoints use the /api/v1 prefix:
//! - POST /api/v1/users/register - Create an account
//! - POST /api/v1/users/login - Authenticate
//! - POST /api/v1/users/token - Refresh the token pair
//! - POST /api/v1/users/logout - End the session (requires auth)
//! - GET  /api/v1/users/me - Current user (requires auth)
//! - POST /api/v1/users/change-password - Change password (requires auth)
//! - GET  /api/v1/healthcheck - Health check endpoint

use crate::handlers::users;
use crate::middleware::AuthMiddleware;
use actix_web::{web, HttpResponse};
use serde_json::json;
use std::sync::Arc;
use streamhub_auth::SessionService;

/// Configure API routes.
///
/// The session service is injected explicitly so the guard middleware
/// carries its own dependencies instead of fishing them out of app
/// data.
pub fn configure_routes(cfg: &mut web::ServiceConfig, sessions: &Arc<SessionService>) {
    cfg.service(
        web::scope("/api/v1")
            .route("/healthcheck", web::get().to(healthcheck_handler))
            .service(
                web::scope("/users")
                    .route("/register", web::post().to(users::register_handler))
                    .route("/login", web::post().to(users::login_handler))
                    .route("/token", web::post().to(users::refresh_handler))
                    .service(
                        web::scope("")
                            .wrap(AuthMiddleware::new(sessions.clone()))
                            .route("/logout", web::post().to(users::logout_handler))
                            .route("/me", web::get().to(users::me_handler))
                            .route(
                                "/change-password",
                                web::post().to(users::change_password_handler),
                            ),
                    ),
            ),
    );
}

/// Health check endpoint handler
async fn healthcheck_handler() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "api_version": "v1"
    }))
}
