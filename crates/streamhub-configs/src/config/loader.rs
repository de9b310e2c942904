//! Loading, environment overrides, and validation for `ServerConfig`.

use super::types::ServerConfig;
use std::fs;
use std::path::Path;

impl ServerConfig {
    /// Load configuration from a TOML file.
    ///
    /// Note: environment overrides are applied separately via
    /// `apply_env_overrides()`; call `validate()` after both steps.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        let config: ServerConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;

        Ok(config)
    }

    /// Apply `STREAMHUB_*` environment variable overrides.
    ///
    /// Environment always wins over the config file, so secrets can be
    /// injected at deploy time without touching `config.toml`.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("STREAMHUB_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("STREAMHUB_PORT") {
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Ok(origin) = std::env::var("STREAMHUB_CORS_ORIGIN") {
            self.server.cors_origin = Some(origin);
        }
        if let Ok(secret) = std::env::var("STREAMHUB_ACCESS_TOKEN_SECRET") {
            self.auth.access_token_secret = secret;
        }
        if let Ok(secret) = std::env::var("STREAMHUB_REFRESH_TOKEN_SECRET") {
            self.auth.refresh_token_secret = secret;
        }
        if let Ok(minutes) = std::env::var("STREAMHUB_ACCESS_TOKEN_EXPIRY_MINUTES") {
            if let Ok(minutes) = minutes.parse() {
                self.auth.access_token_expiry_minutes = minutes;
            }
        }
        if let Ok(days) = std::env::var("STREAMHUB_REFRESH_TOKEN_EXPIRY_DAYS") {
            if let Ok(days) = days.parse() {
                self.auth.refresh_token_expiry_days = days;
            }
        }
        if let Ok(secure) = std::env::var("STREAMHUB_COOKIE_SECURE") {
            if let Ok(secure) = secure.parse() {
                self.auth.cookie_secure = secure;
            }
        }
        if let Ok(level) = std::env::var("STREAMHUB_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Validate configuration settings.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port == 0 {
            return Err(anyhow::anyhow!("Server port cannot be 0"));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_levels.join(", ")
            ));
        }

        let valid_formats = ["compact", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            return Err(anyhow::anyhow!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_formats.join(", ")
            ));
        }

        if self.auth.access_token_secret.is_empty() {
            return Err(anyhow::anyhow!("auth.access_token_secret cannot be empty"));
        }
        if self.auth.refresh_token_secret.is_empty() {
            return Err(anyhow::anyhow!("auth.refresh_token_secret cannot be empty"));
        }
        // Independent secrets per token purpose are the whole point:
        // a leaked access secret must not be able to forge refresh tokens.
        if self.auth.access_token_secret == self.auth.refresh_token_secret {
            return Err(anyhow::anyhow!(
                "auth.access_token_secret and auth.refresh_token_secret must differ"
            ));
        }

        if self.auth.access_token_expiry_minutes <= 0 {
            return Err(anyhow::anyhow!(
                "auth.access_token_expiry_minutes must be positive"
            ));
        }
        if self.auth.refresh_token_expiry_days <= 0 {
            return Err(anyhow::anyhow!(
                "auth.refresh_token_expiry_days must be positive"
            ));
        }

        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(anyhow::anyhow!(
                "auth.bcrypt_cost must be between 4 and 31, got {}",
                self.auth.bcrypt_cost
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.auth.access_token_expiry_minutes, 15);
        assert_eq!(config.auth.refresh_token_expiry_days, 7);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            [server]
            port = 9000

            [auth]
            access_token_secret = "a"
            refresh_token_secret = "b"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.auth.access_token_secret, "a");
        assert_eq!(config.auth.bcrypt_cost, 12);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_identical_secrets_rejected() {
        let mut config = ServerConfig::default();
        config.auth.access_token_secret = "same".to_string();
        config.auth.refresh_token_secret = "same".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut config = ServerConfig::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_log_level_rejected() {
        let mut config = ServerConfig::default();
        config.logging.level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bcrypt_cost_range() {
        let mut config = ServerConfig::default();
        config.auth.bcrypt_cost = 3;
        assert!(config.validate().is_err());
        config.auth.bcrypt_cost = 31;
        assert!(config.validate().is_ok());
    }
}
