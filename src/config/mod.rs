//! Configuration management module
//!
//! Loads server, prediction API and logging settings from the environment

pub mod settings;

pub use settings::{ApiConfig, FallbackPolicy, LoggingConfig, ServerConfig, Settings, DEFAULT_API_URL};
