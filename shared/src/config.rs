//! Configuration management for Lambda functions.

use std::env;
use std::time::Duration;

use crate::view::ViewMode;
use crate::{Error, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Delay before mock event create/update/delete
    pub mutation_latency: Duration,
    /// Delay before a mock calendar connect
    pub connect_latency: Duration,
    /// Delay before listing mock events
    pub list_latency: Duration,
    /// View used when a request does not name one
    pub default_view: ViewMode,
    /// Client id rendered into the mock consent URL
    pub google_client_id: String,
    /// Redirect rendered into the mock consent URL
    pub redirect_uri: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mutation_latency: Duration::from_millis(800),
            connect_latency: Duration::from_millis(1000),
            list_latency: Duration::from_millis(500),
            default_view: ViewMode::Week,
            google_client_id: "mock-client-id".to_string(),
            redirect_uri: "http://localhost:3000/api/google-calendar/auth".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            mutation_latency: latency_var("SIMULATED_LATENCY_MS")?.unwrap_or(defaults.mutation_latency),
            connect_latency: latency_var("CONNECT_LATENCY_MS")?.unwrap_or(defaults.connect_latency),
            list_latency: latency_var("LIST_LATENCY_MS")?.unwrap_or(defaults.list_latency),
            default_view: match env::var("DEFAULT_VIEW") {
                Ok(tag) => tag
                    .parse()
                    .map_err(|e| Error::Config(format!("DEFAULT_VIEW: {}", e)))?,
                Err(_) => defaults.default_view,
            },
            google_client_id: env::var("GOOGLE_CLIENT_ID").unwrap_or(defaults.google_client_id),
            redirect_uri: env::var("OAUTH_REDIRECT_URI").unwrap_or(defaults.redirect_uri),
        })
    }

    /// No simulated latency, for tests and local runs.
    pub fn instant() -> Self {
        Self {
            mutation_latency: Duration::ZERO,
            connect_latency: Duration::ZERO,
            list_latency: Duration::ZERO,
            ..Self::default()
        }
    }
}

fn latency_var(key: &str) -> Result<Option<Duration>> {
    match env::var(key) {
        Ok(raw) => parse_millis(&raw)
            .map(Some)
            .map_err(|e| Error::Config(format!("{}: {}", key, e))),
        Err(_) => Ok(None),
    }
}

fn parse_millis(raw: &str) -> std::result::Result<Duration, String> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| format!("expected milliseconds, got {:?} ({})", raw, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_millis() {
        assert_eq!(parse_millis("250").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_millis(" 0 ").unwrap(), Duration::ZERO);
        assert!(parse_millis("-5").is_err());
        assert!(parse_millis("fast").is_err());
    }

    #[test]
    fn test_defaults_match_dashboard() {
        let config = Config::default();
        assert_eq!(config.default_view, ViewMode::Week);
        assert_eq!(config.list_latency, Duration::from_millis(500));
        assert_eq!(Config::instant().connect_latency, Duration::ZERO);
    }
}
