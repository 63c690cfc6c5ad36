//! Configuration for the NSX-T exporter.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use nsxt_client::NsxtConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::filter::Filters;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] json5::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Complete exporter configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// NSX-T manager connection settings.
    #[serde(default)]
    pub nsxt: NsxtConfig,

    /// Scrape loop and HTTP endpoint settings.
    #[serde(default)]
    pub exporter: ScrapeConfig,

    /// Allow-lists of exported resources.
    #[serde(default)]
    pub filters: Filters,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Scrape loop and HTTP endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Delay between two cycles after a success (default: 60).
    #[serde(default = "default_interval")]
    pub interval_secs: u64,

    /// Delay before retrying after a failed cycle (default: 30).
    #[serde(default = "default_error_interval")]
    pub error_interval_secs: u64,

    /// Address to listen on (default: "0.0.0.0:8080").
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Path for metrics endpoint (default: "/metrics").
    #[serde(default = "default_path")]
    pub path: String,

    /// Metric name prefix (default: "nsxt").
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_interval() -> u64 {
    60
}

fn default_error_interval() -> u64 {
    30
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_path() -> String {
    "/metrics".to_string()
}

fn default_namespace() -> String {
    "nsxt".to_string()
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval(),
            error_interval_secs: default_error_interval(),
            listen: default_listen(),
            path: default_path(),
            namespace: default_namespace(),
        }
    }
}

impl ScrapeConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn error_interval(&self) -> Duration {
        Duration::from_secs(self.error_interval_secs)
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format: "text" or "json".
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl ExporterConfig {
    /// Load configuration from a JSON5 file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse configuration from a JSON5 string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: ExporterConfig = json5::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.nsxt
            .validate()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;

        if self.exporter.interval_secs == 0 {
            return Err(ConfigError::Validation(
                "interval_secs must be > 0".to_string(),
            ));
        }

        if self.exporter.error_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "error_interval_secs must be > 0".to_string(),
            ));
        }

        self.listen_addr()?;

        if !self.exporter.path.starts_with('/') {
            return Err(ConfigError::Validation(
                "Metrics path must start with /".to_string(),
            ));
        }

        if self.exporter.namespace.is_empty() {
            return Err(ConfigError::Validation(
                "namespace must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// The HTTP listen address.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.exporter.listen.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "Invalid listen address: {}",
                self.exporter.listen
            ))
        })
    }
}
