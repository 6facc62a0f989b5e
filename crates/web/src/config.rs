//! Web server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `QUESTLINE_BASE_URL` - Public URL for the site (https enables secure cookies)
//!
//! ## Optional
//! - `QUESTLINE_HOST` - Bind address (default: 127.0.0.1)
//! - `QUESTLINE_PORT` - Listen port (default: 3000)
//! - `QUESTLINE_COUNTER_FRAME_MS` - Counter frame interval (default: 16, 1..=1000)
//! - `QUESTLINE_COUNTER_DURATION_MS` - Counter animation length (default: 1500)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use thiserror::Error;
use url::Url;

const MAX_FRAME_MS: u64 = 1000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Web application configuration.
#[derive(Debug, Clone)]
pub struct WebConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site (validated at load time)
    pub base_url: String,
    /// Animated counter timing
    pub counter: CounterSettings,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "production", "staging")
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions traced
    pub sentry_traces_sample_rate: f32,
}

/// Timing used when streaming animated counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterSettings {
    /// Interval between frames (the server-side refresh rate).
    pub frame_interval: Duration,
    /// Time from first frame to target.
    pub duration: Duration,
}

impl Default for CounterSettings {
    fn default() -> Self {
        Self {
            frame_interval: Duration::from_millis(16),
            duration: questline_core::counter::DEFAULT_DURATION,
        }
    }
}

impl WebConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("QUESTLINE_HOST", "127.0.0.1")?;
        let port = parse_env("QUESTLINE_PORT", "3000")?;
        let base_url = parse_base_url(&get_required_env("QUESTLINE_BASE_URL")?)?.to_string();

        let frame_ms: u64 = parse_env("QUESTLINE_COUNTER_FRAME_MS", "16")?;
        if !(1..=MAX_FRAME_MS).contains(&frame_ms) {
            return Err(ConfigError::InvalidEnvVar(
                "QUESTLINE_COUNTER_FRAME_MS".to_string(),
                format!("must be between 1 and {MAX_FRAME_MS}"),
            ));
        }
        let duration_ms: u64 = parse_env("QUESTLINE_COUNTER_DURATION_MS", "1500")?;

        Ok(Self {
            host,
            port,
            base_url,
            counter: CounterSettings {
                frame_interval: Duration::from_millis(frame_ms),
                duration: Duration::from_millis(duration_ms),
            },
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Configuration for local development and tests.
    #[must_use]
    pub fn local() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            counter: CounterSettings::default(),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = std::env::var(key).unwrap_or_else(|_| default.to_string());
    raw.parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse the public base URL. Only http and https are accepted.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| {
        ConfigError::InvalidEnvVar("QUESTLINE_BASE_URL".to_string(), e.to_string())
    })?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        _ => Err(ConfigError::InvalidEnvVar(
            "QUESTLINE_BASE_URL".to_string(),
            "must be an http(s) URL with a host".to_string(),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_accepts_https() {
        let url = parse_base_url("https://play.questline.dev").unwrap();
        assert_eq!(url.host_str(), Some("play.questline.dev"));
    }

    #[test]
    fn test_parse_base_url_rejects_other_schemes() {
        assert!(parse_base_url("ftp://files.example.org").is_err());
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn test_is_secure() {
        let mut config = WebConfig::local();
        assert!(!config.is_secure());
        config.base_url = "https://play.questline.dev".to_string();
        assert!(config.is_secure());
    }

    #[test]
    fn test_socket_addr() {
        let addr = WebConfig::local().socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_default_counter_settings() {
        let settings = CounterSettings::default();
        assert_eq!(settings.frame_interval, Duration::from_millis(16));
        assert_eq!(settings.duration, Duration::from_millis(1500));
    }
}
