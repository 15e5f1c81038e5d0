//! Error handling for i18n-lookup
//!
//! This module defines the error type used by configuration loading and the
//! locale-tree providers. Lookups themselves never return these errors: every
//! failure on the translation path degrades to a fallback string.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for i18n-lookup
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid localization tree {path}: {reason}")]
    InvalidTree { path: PathBuf, reason: String },

    #[error("Logging setup error: {0}")]
    Logging(String),
}

/// Result type alias for i18n-lookup operations
pub type Result<T> = std::result::Result<T, LookupError>;

impl LookupError {
    /// Check if the error is recoverable
    ///
    /// Recoverable errors only cost a single (locale, namespace) pair; lookups
    /// keep going against the remaining tiers.
    pub fn is_recoverable(&self) -> bool {
        match self {
            LookupError::Config(_) => false,
            LookupError::ConfigLoad(_) => false,
            LookupError::Toml(_) => false,
            LookupError::Io(_) => true,
            LookupError::Serialization(_) => true,
            LookupError::InvalidTree { .. } => true,
            LookupError::Logging(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LookupError::Config(_) => ErrorSeverity::Critical,
            LookupError::ConfigLoad(_) => ErrorSeverity::Critical,
            LookupError::Toml(_) => ErrorSeverity::Critical,
            LookupError::InvalidTree { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
