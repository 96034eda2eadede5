//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{DoseBuddyError, Result};
use super::{FrontendMode, Settings};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    if settings.frontend.mode == FrontendMode::Telegram {
        validate_bot_config(&settings.bot)?;
    }
    validate_backend_config(&settings.backend)?;
    validate_session_config(&settings.session)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(DoseBuddyError::Config(
            "Bot token is required in telegram mode".to_string()
        ));
    }

    Ok(())
}

/// Validate backend configuration
fn validate_backend_config(config: &super::BackendConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(DoseBuddyError::Config(
            "Backend base URL is required".to_string()
        ));
    }

    url::Url::parse(&config.base_url).map_err(|e| {
        DoseBuddyError::Config(format!("Invalid backend base URL '{}': {}", config.base_url, e))
    })?;

    if config.timeout_seconds == 0 {
        return Err(DoseBuddyError::Config(
            "Backend timeout must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate session configuration
fn validate_session_config(config: &super::SessionConfig) -> Result<()> {
    if config.idle_ttl_seconds == 0 {
        return Err(DoseBuddyError::Config(
            "Session idle TTL must be greater than 0".to_string()
        ));
    }

    if config.cleanup_interval_seconds == 0 {
        return Err(DoseBuddyError::Config(
            "Session cleanup interval must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(DoseBuddyError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(DoseBuddyError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
