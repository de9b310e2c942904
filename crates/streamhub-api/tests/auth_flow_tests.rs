//! End-to-end HTTP tests for the authentication flow
//!
//! Covers the full session lifecycle over the real route table and
//! middleware: registration, login with cookie issuance, guarded
//! routes, refresh rotation with reuse detection, logout, and password
//! changes.

use actix_web::http::header;
use actix_web::{cookie::Cookie, test, web, App};
use serde_json::json;
use std::sync::Arc;
use streamhub_api::routes;
use streamhub_auth::{InMemoryUserRepo, SessionService, TokenCodec};
use streamhub_configs::AuthSettings;

fn test_settings() -> AuthSettings {
    AuthSettings {
        access_token_secret: "flow-test-access-secret".to_string(),
        refresh_token_secret: "flow-test-refresh-secret".to_string(),
        bcrypt_cost: 4, // low cost for faster tests
        cookie_secure: false,
        ..Default::default()
    }
}

macro_rules! test_app {
    () => {{
        let settings = test_settings();
        let repo = Arc::new(InMemoryUserRepo::new());
        let sessions = Arc::new(SessionService::new(
            repo,
            TokenCodec::new(&settings),
            settings.clone(),
        ));
        test::init_service(
            App::new()
                .app_data(web::Data::new(sessions.clone()))
                .app_data(web::Data::new(settings))
                .configure(|cfg| routes::configure_routes(cfg, &sessions)),
        )
        .await
    }};
}

fn register_body() -> serde_json::Value {
    json!({
        "username": "alice",
        "email": "alice@x.com",
        "fullName": "Alice Example",
        "password": "p1secret!"
    })
}

/// Register alice and assert success.
macro_rules! register {
    ($app:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/users/register")
            .set_json(register_body())
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), 201);
    }};
}

/// Log alice in and return the response body.
macro_rules! login {
    ($app:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/v1/users/login")
            .set_json(json!({"username": "alice", "password": "p1secret!"}))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        body
    }};
}

#[actix_web::test]
async fn test_healthcheck() {
    let app = test_app!();
    let req = test::TestRequest::get()
        .uri("/api/v1/healthcheck")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_register_sanitizes_response() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/users/register")
        .set_json(register_body())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@x.com");
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
    assert!(body.get("refreshToken").is_none());
}

#[actix_web::test]
async fn test_register_duplicate_email_conflicts() {
    let app = test_app!();
    register!(app);

    // Same email, different username
    let req = test::TestRequest::post()
        .uri("/api/v1/users/register")
        .set_json(json!({
            "username": "bob",
            "email": "alice@x.com",
            "fullName": "Bob Example",
            "password": "p1secret!"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);
}

#[actix_web::test]
async fn test_register_missing_field_rejected() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/users/register")
        .set_json(json!({
            "username": "alice",
            "email": "alice@x.com",
            "fullName": "   ",
            "password": "p1secret!"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

/// Wrong password and unknown account must be indistinguishable.
#[actix_web::test]
async fn test_login_failures_share_one_shape() {
    let app = test_app!();
    register!(app);

    let req = test::TestRequest::post()
        .uri("/api/v1/users/login")
        .set_json(json!({"username": "alice", "password": "wrong"}))
        .to_request();
    let wrong_password = test::call_service(&app, req).await;
    assert_eq!(wrong_password.status(), 401);
    let wrong_password_body: serde_json::Value = test::read_body_json(wrong_password).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users/login")
        .set_json(json!({"username": "mallory", "password": "p1secret!"}))
        .to_request();
    let unknown_user = test::call_service(&app, req).await;
    assert_eq!(unknown_user.status(), 401);
    let unknown_user_body: serde_json::Value = test::read_body_json(unknown_user).await;

    assert_eq!(wrong_password_body, unknown_user_body);
}

#[actix_web::test]
async fn test_login_sets_httponly_cookies_and_echoes_tokens() {
    let app = test_app!();
    register!(app);

    let req = test::TestRequest::post()
        .uri("/api/v1/users/login")
        .set_json(json!({"email": "alice@x.com", "password": "p1secret!"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let cookies: Vec<Cookie<'_>> = resp.response().cookies().collect();
    let access = cookies.iter().find(|c| c.name() == "accessToken").unwrap();
    let refresh = cookies.iter().find(|c| c.name() == "refreshToken").unwrap();
    assert!(access.http_only().unwrap_or(false));
    assert!(refresh.http_only().unwrap_or(false));

    let access_value = access.value().to_string();
    let refresh_value = refresh.value().to_string();

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["accessToken"], access_value);
    assert_eq!(body["refreshToken"], refresh_value);
    assert_eq!(body["user"]["username"], "alice");
}

#[actix_web::test]
async fn test_guarded_route_requires_token() {
    let app = test_app!();
    register!(app);

    // No token at all
    let req = test::TestRequest::get().uri("/api/v1/users/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body = login!(app);

    // Refresh token presented as bearer must be rejected
    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header((
            header::AUTHORIZATION,
            format!("Bearer {}", body["refreshToken"].as_str().unwrap()),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    // Access token as bearer works
    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .insert_header((
            header::AUTHORIZATION,
            format!("Bearer {}", body["accessToken"].as_str().unwrap()),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let me: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(me["username"], "alice");

    // Access token in the cookie works too
    let req = test::TestRequest::get()
        .uri("/api/v1/users/me")
        .cookie(Cookie::new(
            "accessToken",
            body["accessToken"].as_str().unwrap(),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

/// The canonical rotation scenario: refresh with R1 succeeds and yields
/// R2 != R1; replaying R1 fails; R2 still works.
#[actix_web::test]
async fn test_refresh_rotation_and_reuse_detection() {
    let app = test_app!();
    register!(app);
    let body = login!(app);
    let r1 = body["refreshToken"].as_str().unwrap().to_string();

    // Refresh via body field
    let req = test::TestRequest::post()
        .uri("/api/v1/users/token")
        .set_json(json!({ "refreshToken": r1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let rotated: serde_json::Value = test::read_body_json(resp).await;
    let r2 = rotated["refreshToken"].as_str().unwrap().to_string();
    assert_ne!(r1, r2);

    // Replaying R1 is rejected
    let req = test::TestRequest::post()
        .uri("/api/v1/users/token")
        .set_json(json!({ "refreshToken": r1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    // R2, this time via cookie, still works
    let req = test::TestRequest::post()
        .uri("/api/v1/users/token")
        .cookie(Cookie::new("refreshToken", r2))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_refresh_without_token_rejected() {
    let app = test_app!();
    let req = test::TestRequest::post()
        .uri("/api/v1/users/token")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_logout_invalidates_refresh_token_and_clears_cookies() {
    let app = test_app!();
    register!(app);
    let body = login!(app);
    let access = body["accessToken"].as_str().unwrap().to_string();
    let refresh = body["refreshToken"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/users/logout")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", access)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    // Both cookies are expired with empty values
    let cookies: Vec<Cookie<'_>> = resp.response().cookies().collect();
    for name in ["accessToken", "refreshToken"] {
        let cookie = cookies.iter().find(|c| c.name() == name).unwrap();
        assert_eq!(cookie.value(), "");
    }

    // The pre-logout refresh token no longer rotates
    let req = test::TestRequest::post()
        .uri("/api/v1/users/token")
        .set_json(json!({ "refreshToken": refresh }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_change_password_flow() {
    let app = test_app!();
    register!(app);
    let body = login!(app);
    let access = body["accessToken"].as_str().unwrap().to_string();

    // Wrong old password
    let req = test::TestRequest::post()
        .uri("/api/v1/users/change-password")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", access)))
        .set_json(json!({"oldPassword": "wrong", "newPassword": "p2secret!"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    // Correct old password
    let req = test::TestRequest::post()
        .uri("/api/v1/users/change-password")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", access)))
        .set_json(json!({"oldPassword": "p1secret!", "newPassword": "p2secret!"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    // Old password is dead, new one logs in
    let req = test::TestRequest::post()
        .uri("/api/v1/users/login")
        .set_json(json!({"username": "alice", "password": "p1secret!"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let req = test::TestRequest::post()
        .uri("/api/v1/users/login")
        .set_json(json!({"username": "alice", "password": "p2secret!"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
}
