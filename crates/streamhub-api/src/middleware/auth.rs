//! Authentication middleware for the streamhub API
//!
//! This middleware:
//! 1. Locates the access token in the `accessToken` cookie or the
//!    `Authorization: Bearer` header (cookie takes precedence)
//! 2. Verifies it with purpose = access and loads the referenced user
//! 3. Attaches the sanitized `CurrentUser` to request extensions
//! 4. Short-circuits with a uniform 401 on any failure — the response
//!    never distinguishes missing, expired, malformed, wrong-purpose,
//!    or unknown-user cases
//!
//! ## Usage
//!
//! ```rust,ignore
//! use streamhub_api::middleware::AuthMiddleware;
//! use actix_web::App;
//!
//! App::new()
//!     .service(
//!         web::scope("/users")
//!             .wrap(AuthMiddleware::new(sessions.clone()))
//!             .route("/me", web::get().to(me_handler)),
//!     )
//! ```
//!
//! Guarded handlers receive the identity via the `CurrentUser`
//! extractor.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, HttpMessage, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use log::debug;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};
use streamhub_auth::{SessionService, ACCESS_COOKIE_NAME};

use crate::handlers::users::models::AuthErrorResponse;

/// Authentication middleware factory
pub struct AuthMiddleware {
    sessions: Arc<SessionService>,
}

impl AuthMiddleware {
    /// Create a new authentication middleware over the session service.
    pub fn new(sessions: Arc<SessionService>) -> Self {
        Self { sessions }
    }
}

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = Error> + 'static,
    S::Future: 'static,
{
    type Response = ServiceResponse;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            sessions: self.sessions.clone(),
        }))
    }
}

/// Authentication middleware service instance
pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
    sessions: Arc<SessionService>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse, Error = Error> + 'static,
    S::Future: 'static,
{
    type Response = ServiceResponse;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let sessions = self.sessions.clone();

        Box::pin(async move {
            let token = extract_access_token(&req);

            let token = match token {
                Some(token) => token,
                None => {
                    debug!("request to {} without access token", req.path());
                    return Ok(unauthorized(req));
                },
            };

            match sessions.authenticate(&token).await {
                Ok(user) => {
                    req.extensions_mut().insert(user);
                    service.call(req).await
                },
                Err(err) if err.is_fault() => {
                    log::error!("auth guard fault: {}", err);
                    let (req, _) = req.into_parts();
                    let response = HttpResponse::InternalServerError().json(
                        AuthErrorResponse::new("internal_error", "Authentication failed"),
                    );
                    Ok(ServiceResponse::new(req, response))
                },
                Err(err) => {
                    debug!("request to {} rejected: {}", req.path(), err);
                    Ok(unauthorized(req))
                },
            }
        })
    }
}

/// Locate the access token: `accessToken` cookie first, then the
/// `Authorization: Bearer` header.
fn extract_access_token(req: &ServiceRequest) -> Option<String> {
    if let Some(cookie) = req.request().cookie(ACCESS_COOKIE_NAME) {
        return Some(cookie.value().to_string());
    }

    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Uniform rejection: one status, one body, for every failure reason.
fn unauthorized(req: ServiceRequest) -> ServiceResponse {
    let (req, _) = req.into_parts();
    let response = HttpResponse::Unauthorized().json(AuthErrorResponse::new(
        "unauthorized",
        "Invalid or missing access token",
    ));
    ServiceResponse::new(req, response)
}
