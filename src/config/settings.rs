//! Application configuration settings
//!
//! Defines all configuration structures and loading logic

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Public prediction endpoint used when nothing else is configured
pub const DEFAULT_API_URL: &str = "https://taxifare.lewagon.ai/predict";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Server configuration
    pub server: ServerConfig,
    /// Prediction API configuration
    pub api: ApiConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,
    /// Listen port
    pub port: u16,
}

/// Prediction API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Default API URL, overridable per submission
    pub url: String,
    /// Timeout of each attempt in seconds
    pub timeout: u64,
    /// When a failed GET is retried as a POST
    pub fallback: FallbackPolicy,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

/// Decides which failed GET statuses are retried with POST + JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FallbackPolicy {
    /// Any status >= 400
    #[default]
    #[serde(rename = "any_error")]
    AnyErrorStatus,
    /// Only 404 and 405
    #[serde(rename = "not_found_or_method")]
    NotFoundOrMethodNotAllowed,
}

impl FromStr for FallbackPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "any_error" => Ok(FallbackPolicy::AnyErrorStatus),
            "not_found_or_method" => Ok(FallbackPolicy::NotFoundOrMethodNotAllowed),
            other => anyhow::bail!("Invalid fallback policy: {}", other),
        }
    }
}

impl Settings {
    /// Create a new configuration instance
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        let settings = Self {
            server: ServerConfig {
                host: get_env_or_default("SERVER_HOST", "127.0.0.1"),
                port: get_env_or_default("SERVER_PORT", "8501")
                    .parse()
                    .context("Invalid port number")?,
            },
            api: ApiConfig {
                url: get_env_or_default("FARE_API_URL", DEFAULT_API_URL),
                timeout: get_env_or_default("REQUEST_TIMEOUT", "10")
                    .parse()
                    .context("Invalid timeout value")?,
                fallback: get_env_or_default("FALLBACK_POLICY", "any_error")
                    .parse()
                    .context("Invalid fallback policy")?,
            },
            logging: LoggingConfig {
                level: get_env_or_default("RUST_LOG", "info"),
                format: get_env_or_default("LOG_FORMAT", "text"),
            },
        };

        // Validate configuration
        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration validity
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Port number cannot be 0");
        }

        if !self.api.url.starts_with("http") {
            anyhow::bail!("Invalid prediction API URL format, should start with 'http'");
        }

        if self.api.timeout == 0 {
            anyhow::bail!("Timeout values cannot be 0");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8501,
            },
            api: ApiConfig {
                url: DEFAULT_API_URL.to_string(),
                timeout: 10,
                fallback: FallbackPolicy::AnyErrorStatus,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "text".to_string(),
            },
        }
    }
}

/// Get environment variable or default value
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
