//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::Path;
use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub frontend: FrontendConfig,
    pub bot: BotConfig,
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// Which chat front-end drives the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FrontendMode {
    Console,
    Telegram,
}

/// Front-end selection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FrontendConfig {
    pub mode: FrontendMode,
}

/// Telegram bot configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BotConfig {
    pub token: String,
}

/// Prediction backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

/// Session store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    pub idle_ttl_seconds: u64,
    pub cleanup_interval_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory that receives the daily rolling log file
    pub file_path: String,
    pub json: bool,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::load(config::File::with_name("config").required(false))
    }

    /// Load settings from an explicit file, still honouring environment overrides
    pub fn from_file(path: &Path) -> Result<Self, config::ConfigError> {
        Self::load(config::File::from(path))
    }

    fn load(file: config::File<config::FileSourceFile, config::FileFormat>) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&Settings::default())?)
            .add_source(file)
            .add_source(config::Environment::with_prefix("DOSEBUDDY").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::DoseBuddyError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            frontend: FrontendConfig {
                mode: FrontendMode::Console,
            },
            bot: BotConfig {
                token: String::new(),
            },
            backend: BackendConfig {
                base_url: "http://localhost:5000".to_string(),
                timeout_seconds: 10,
                user_agent: "DoseBuddy/1.0".to_string(),
            },
            session: SessionConfig {
                idle_ttl_seconds: 86_400,
                cleanup_interval_seconds: 600,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "logs".to_string(),
                json: false,
            },
        }
    }
}
