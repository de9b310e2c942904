// Logging module — powered by tracing-subscriber
//
// Uses tracing-subscriber for structured events. A compatibility bridge
// (`tracing_log::LogTracer`) captures all existing `log::*` macro calls
// and routes them through the subscriber, so library crates that log via
// `log` end up in the same stream.

use streamhub_configs::LoggingSettings;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

/// Log format type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact text format: timestamp LEVEL target - message
    Compact,
    /// JSON Lines format for structured logging
    Json,
}

impl LogFormat {
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" | "jsonl" => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

/// Build the `EnvFilter` from the base level plus hardcoded noisy-crate
/// overrides.
fn build_env_filter(level: &str) -> anyhow::Result<EnvFilter> {
    // Base directive — set the default level
    let mut directives = vec![level.to_string()];

    // Suppress noisy third-party crates
    let noisy: &[(&str, &str)] = &[
        ("actix_server", "warn"),
        ("actix_http", "warn"),
        ("h2", "warn"),
        ("mio", "warn"),
    ];
    for (target, lvl) in noisy {
        directives.push(format!("{}={}", target, lvl));
    }

    EnvFilter::try_new(directives.join(","))
        .map_err(|e| anyhow::anyhow!("Invalid log filter: {}", e))
}

/// Initialize the global subscriber and the `log` bridge.
///
/// Call once at startup, after configuration is loaded and validated.
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    tracing_log::LogTracer::init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize log bridge: {}", e))?;

    let filter = build_env_filter(&settings.level)?;
    let registry = tracing_subscriber::registry().with(filter);

    match LogFormat::from_str(&settings.format) {
        LogFormat::Json => tracing::subscriber::set_global_default(
            registry.with(tracing_subscriber::fmt::layer().json()),
        )?,
        LogFormat::Compact => tracing::subscriber::set_global_default(
            registry.with(tracing_subscriber::fmt::layer().compact()),
        )?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!(LogFormat::from_str("json"), LogFormat::Json);
        assert_eq!(LogFormat::from_str("JSONL"), LogFormat::Json);
        assert_eq!(LogFormat::from_str("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::from_str("anything-else"), LogFormat::Compact);
    }

    #[test]
    fn test_filter_accepts_valid_levels() {
        for level in ["error", "warn", "info", "debug", "trace"] {
            assert!(build_env_filter(level).is_ok());
        }
    }
}
