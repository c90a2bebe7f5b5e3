//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (MCP_EDGAR_*)
//! 2. TOML config file (if MCP_EDGAR_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::SelectionStrategy;

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (MCP_EDGAR_*)
/// 2. TOML config file (if MCP_EDGAR_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// User-Agent sent with every EDGAR request.
    ///
    /// EDGAR rejects anonymous clients, so this must name the application and
    /// carry a contact address. Set via MCP_EDGAR_USER_AGENT.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via MCP_EDGAR_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Minimum spacing between outbound requests in milliseconds.
    ///
    /// Set via MCP_EDGAR_REQUEST_INTERVAL_MS environment variable.
    #[serde(default = "default_request_interval_ms")]
    pub request_interval_ms: u64,

    /// Base URL of the submissions API.
    ///
    /// Set via MCP_EDGAR_DATA_BASE_URL environment variable.
    #[serde(default = "default_data_base_url")]
    pub data_base_url: String,

    /// Base URL of the filing archives.
    ///
    /// Set via MCP_EDGAR_ARCHIVES_BASE_URL environment variable.
    #[serde(default = "default_archives_base_url")]
    pub archives_base_url: String,

    /// Directory that relative output paths are resolved against.
    ///
    /// When unset, relative paths are used as given (relative to the server's
    /// working directory). Set via MCP_EDGAR_OUTPUT_ROOT environment variable.
    #[serde(default)]
    pub output_root: Option<PathBuf>,

    /// Strategy used when several filings match a query.
    ///
    /// Set via MCP_EDGAR_SELECTION environment variable.
    #[serde(default)]
    pub selection: SelectionStrategy,

    /// Skip files that already exist in the output directory.
    ///
    /// Set via MCP_EDGAR_RESUME_DOWNLOADS environment variable.
    #[serde(default)]
    pub resume_downloads: bool,
}

fn default_user_agent() -> String {
    "mcp-edgar/0.1 (contact@example.com)".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_request_interval_ms() -> u64 {
    200
}

fn default_data_base_url() -> String {
    "https://data.sec.gov".into()
}

fn default_archives_base_url() -> String {
    "https://www.sec.gov/Archives/edgar/data".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            request_interval_ms: default_request_interval_ms(),
            data_base_url: default_data_base_url(),
            archives_base_url: default_archives_base_url(),
            output_root: None,
            selection: SelectionStrategy::default(),
            resume_downloads: false,
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Request spacing as Duration.
    pub fn request_interval(&self) -> Duration {
        Duration::from_millis(self.request_interval_ms)
    }

    /// Resolve a caller-supplied output directory against `output_root`.
    ///
    /// Absolute paths, and any path when no root is configured, are returned
    /// unchanged.
    pub fn resolve_output_dir(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        match &self.output_root {
            Some(root) if !path.is_absolute() => root.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `MCP_EDGAR_`
    /// 2. TOML file from `MCP_EDGAR_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("MCP_EDGAR_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("MCP_EDGAR_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        Self::from_figment(figment)
    }

    /// Extract and validate a configuration from an assembled figment.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}
