//! Default values for configuration fields.
//!
//! Each function backs a `#[serde(default = "...")]` attribute so a
//! partial config file still produces a complete `ServerConfig`.

pub fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

pub fn default_server_port() -> u16 {
    8000
}

/// Development-only signing secret for access tokens.
/// Must be overridden in production via config or
/// `STREAMHUB_ACCESS_TOKEN_SECRET`.
pub fn default_access_token_secret() -> String {
    "streamhub-dev-access-secret".to_string()
}

/// Development-only signing secret for refresh tokens.
/// Must be overridden in production via config or
/// `STREAMHUB_REFRESH_TOKEN_SECRET`.
pub fn default_refresh_token_secret() -> String {
    "streamhub-dev-refresh-secret".to_string()
}

pub fn default_access_token_expiry_minutes() -> i64 {
    15
}

pub fn default_refresh_token_expiry_days() -> i64 {
    7
}

pub fn default_bcrypt_cost() -> u32 {
    12
}

pub fn default_cookie_secure() -> bool {
    true
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_log_format() -> String {
    "compact".to_string()
}
