//! Configuration validation module
//!
//! This module provides validation functions for lookup configuration
//! to ensure all locale settings are consistent before an `I18n` is built.

use crate::utils::errors::{LookupError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_i18n_config(&settings.i18n)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate internationalization configuration
pub fn validate_i18n_config(config: &super::I18nConfig) -> Result<()> {
    if config.supported_locales.is_empty() {
        return Err(LookupError::Config(
            "At least one supported locale is required".to_string()
        ));
    }

    if config.supported_locales.iter().any(|code| code.trim().is_empty()) {
        return Err(LookupError::Config(
            "Supported locale codes must not be empty".to_string()
        ));
    }

    if !config.supported_locales.contains(&config.current_locale) {
        return Err(LookupError::Config(
            format!("Current locale '{}' must be in supported locales list", config.current_locale)
        ));
    }

    if !config.supported_locales.contains(&config.fallback_locale) {
        return Err(LookupError::Config(
            format!("Fallback locale '{}' must be in supported locales list", config.fallback_locale)
        ));
    }

    if config.rtl_locales.iter().any(|code| code.trim().is_empty()) {
        return Err(LookupError::Config(
            "RTL locale codes must not be empty".to_string()
        ));
    }

    if config.show_missing_identifier_message && config.missing_identifier_message.is_empty() {
        return Err(LookupError::Config(
            "Missing identifier message is required when it is shown".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(LookupError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(LookupError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
