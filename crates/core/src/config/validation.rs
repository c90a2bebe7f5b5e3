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
    /// - `user_agent` is empty or carries no contact address
    /// - `timeout_ms` is less than 100ms or exceeds 5 minutes
    /// - `request_interval_ms` exceeds 10 seconds
    /// - either base URL is not an http(s) URL
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.user_agent.trim().is_empty() {
            return Err(ConfigError::Invalid { field: "user_agent".into(), reason: "must not be empty".into() });
        }
        if !self.user_agent.contains('@') {
            return Err(ConfigError::Invalid {
                field: "user_agent".into(),
                reason: "must include a contact email address".into(),
            });
        }

        if self.timeout_ms < 100 {
            return Err(ConfigError::Invalid { field: "timeout_ms".into(), reason: "must be at least 100ms".into() });
        }
        if self.timeout_ms > 300_000 {
            return Err(ConfigError::Invalid {
                field: "timeout_ms".into(),
                reason: "must not exceed 5 minutes (300000ms)".into(),
            });
        }

        if self.request_interval_ms > 10_000 {
            return Err(ConfigError::Invalid {
                field: "request_interval_ms".into(),
                reason: "must not exceed 10 seconds (10000ms)".into(),
            });
        }
        if self.request_interval_ms < 100 {
            tracing::warn!(
                request_interval_ms = self.request_interval_ms,
                "EDGAR allows at most 10 requests per second; short intervals may get the client blocked"
            );
        }

        validate_base_url("data_base_url", &self.data_base_url)?;
        validate_base_url("archives_base_url", &self.archives_base_url)?;

        Ok(())
    }
}

fn validate_base_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let parsed = url::Url::parse(value)
        .map_err(|e| ConfigError::Invalid { field: field.into(), reason: format!("not a valid URL: {e}") })?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ConfigError::Invalid { field: field.into(), reason: format!("unsupported scheme: {scheme}") }),
    }
}
