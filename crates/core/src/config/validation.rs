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

    #[error("missing required configuration: {field} ({hint})")]
    Missing { field: String, hint: String },
}

impl AppConfig {
    /// Validate configuration values after loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if:
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `user_agent` is empty
    /// - `base_url` is not an absolute http(s) URL
    /// - `collection_match` is empty
    /// - `collection_ttl_secs` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }

        match url::Url::parse(&self.base_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => {
                return Err(ConfigError::Invalid {
                    field: "base_url".into(),
                    reason: format!("unsupported scheme '{}'", parsed.scheme()),
                });
            }
            Err(e) => return Err(ConfigError::Invalid { field: "base_url".into(), reason: e.to_string() }),
        }

        if self.collection_match.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "collection_match".into(), reason: "must not be empty".into() });
        }

        if self.collection_ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "collection_ttl_secs".into(),
                reason: "must be greater than 0".into(),
            });
        }

        if self.base_url.ends_with('/') {
            tracing::warn!(base_url = %self.base_url, "base_url has a trailing slash; request paths will contain '//'");
        }

        Ok(())
    }
}
