//! Configuration types for the streamhub server.

use serde::{Deserialize, Serialize};

use super::defaults::*;

/// Top-level server configuration, loaded from `config.toml` with
/// environment overrides applied afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: HttpSettings,

    #[serde(default)]
    pub auth: AuthSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Bind address
    #[serde(default = "default_server_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_server_port")]
    pub port: u16,

    /// Allowed CORS origin. When set, credentialed cross-origin requests
    /// are permitted from exactly this origin; when absent, any origin is
    /// allowed without credentials.
    #[serde(default)]
    pub cors_origin: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            cors_origin: None,
        }
    }
}

/// Authentication and token settings.
///
/// Access and refresh tokens are signed with independent secrets so a
/// leaked access-token secret cannot be used to forge refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Signing secret for access tokens
    #[serde(default = "default_access_token_secret")]
    pub access_token_secret: String,

    /// Signing secret for refresh tokens
    #[serde(default = "default_refresh_token_secret")]
    pub refresh_token_secret: String,

    /// Access token lifetime in minutes (default: 15)
    #[serde(default = "default_access_token_expiry_minutes")]
    pub access_token_expiry_minutes: i64,

    /// Refresh token lifetime in days (default: 7)
    #[serde(default = "default_refresh_token_expiry_days")]
    pub refresh_token_expiry_days: i64,

    /// Bcrypt cost factor (default: 12, range: 4-31)
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,

    /// Whether auth cookies require HTTPS (default: true)
    #[serde(default = "default_cookie_secure")]
    pub cookie_secure: bool,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            access_token_secret: default_access_token_secret(),
            refresh_token_secret: default_refresh_token_secret(),
            access_token_expiry_minutes: default_access_token_expiry_minutes(),
            refresh_token_expiry_days: default_refresh_token_expiry_days(),
            bcrypt_cost: default_bcrypt_cost(),
            cookie_secure: default_cookie_secure(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Base log level: error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: compact or json
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
