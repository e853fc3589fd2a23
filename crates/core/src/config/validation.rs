//! Configuration validation rules.
//!
//! This module provides validation logic for `AppConfig` values
//! after they have been loaded from environment, files, or defaults.

use crate::config::AppConfig;
use thiserror::Error;

/// Configuration validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("invalid configuration: {field} - {reason}")]
    Invalid { field: String, reason: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - any title is blank
    /// - a site base URL is not an http(s) URL
    /// - `timeout_ms` is set outside 100ms..=5 minutes
    /// - `user_agent` is set but empty
    /// - `port` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.titles.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::Invalid { field: "titles".into(), reason: "titles must not be blank".into() });
        }

        for (field, value) in [
            ("imdb_url", &self.imdb_url),
            ("rotten_tomatoes_url", &self.rotten_tomatoes_url),
            ("metacritic_url", &self.metacritic_url),
        ] {
            let parsed = url::Url::parse(value)
                .map_err(|e| ConfigError::Invalid { field: field.into(), reason: e.to_string() })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::Invalid { field: field.into(), reason: "must be an http(s) URL".into() });
            }
        }

        if let Some(timeout_ms) = self.timeout_ms {
            if timeout_ms < 100 {
                return Err(ConfigError::Invalid {
                    field: "timeout_ms".into(),
                    reason: "must be at least 100ms".into(),
                });
            }
            if timeout_ms > 300_000 {
                return Err(ConfigError::Invalid {
                    field: "timeout_ms".into(),
                    reason: "must not exceed 5 minutes (300000ms)".into(),
                });
            }
        }

        if self.user_agent.as_deref().is_some_and(str::is_empty) {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        if self.port == 0 {
            return Err(ConfigError::Invalid { field: "port".into(), reason: "must be greater than 0".into() });
        }

        if self.titles.is_empty() {
            tracing::warn!("no default titles configured; scrape runs must name titles explicitly");
        }

        Ok(())
    }
}
