// Cookie handling for HttpOnly token cookies
//
// Access and refresh tokens travel to browsers as HttpOnly cookies; the
// same names are used for the JSON body fields, and the refresh endpoint
// accepts its token under either transport.

use actix_web::cookie::{Cookie, SameSite};
use chrono::{DateTime, Utc};

/// Cookie name for the access token
pub const ACCESS_COOKIE_NAME: &str = "accessToken";

/// Cookie name for the refresh token
pub const REFRESH_COOKIE_NAME: &str = "refreshToken";

/// Configuration for authentication cookies
#[derive(Debug, Clone)]
pub struct CookieConfig {
    /// Whether to set the Secure flag (true outside local development)
    pub secure: bool,
    /// Cookie path (default: "/")
    pub path: String,
    /// SameSite policy
    pub same_site: SameSite,
    /// Domain (None = current domain)
    pub domain: Option<String>,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            secure: true,
            path: "/".to_string(),
            same_site: SameSite::Strict,
            domain: None,
        }
    }
}

/// Create an HttpOnly cookie carrying a signed token.
///
/// # Arguments
/// * `name` - Cookie name (`ACCESS_COOKIE_NAME` or `REFRESH_COOKIE_NAME`)
/// * `token` - Signed token string
/// * `expires_at` - Token expiry instant; the cookie expires with it
/// * `config` - Cookie configuration
pub fn create_token_cookie<'a>(
    name: &'static str,
    token: &str,
    expires_at: DateTime<Utc>,
    config: &CookieConfig,
) -> Cookie<'a> {
    let expires = cookie::time::OffsetDateTime::from_unix_timestamp(expires_at.timestamp())
        .unwrap_or_else(|_| {
            log::warn!(
                "token expiry timestamp {} is out of OffsetDateTime range; \
                falling back to current time plus 24 h",
                expires_at.timestamp()
            );
            cookie::time::OffsetDateTime::now_utc() + cookie::time::Duration::hours(24)
        });

    let mut cookie = Cookie::build(name, token.to_string())
        .path(config.path.clone())
        .http_only(true)
        .secure(config.secure)
        .same_site(config.same_site)
        .expires(expires)
        .finish();

    if let Some(ref domain) = config.domain {
        cookie.set_domain(domain.clone());
    }

    cookie
}

/// Create a cookie that clears/expires a token cookie.
///
/// Used during logout to remove the token cookies from the browser.
pub fn create_expired_cookie<'a>(name: &'static str, config: &CookieConfig) -> Cookie<'a> {
    let mut cookie = Cookie::build(name, "")
        .path(config.path.clone())
        .http_only(true)
        .secure(config.secure)
        .same_site(config.same_site)
        .expires(cookie::time::OffsetDateTime::UNIX_EPOCH)
        .finish();

    if let Some(ref domain) = config.domain {
        cookie.set_domain(domain.clone());
    }

    cookie
}
