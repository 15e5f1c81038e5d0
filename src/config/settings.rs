//! Lookup settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use crate::utils::errors::Result;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub i18n: I18nConfig,
    pub logging: LoggingConfig,
}

/// How identifiers map onto the locale table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupMode {
    /// The first identifier segment names a namespace file, loaded on demand.
    #[default]
    Namespaced,
    /// Every namespace is merged into one tree per locale; the whole
    /// identifier is the lookup path.
    Merged,
}

/// Internationalization configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Ordered list of valid locale codes
    pub supported_locales: Vec<String>,
    pub current_locale: String,
    /// Locale consulted when the current locale lacks an entry
    pub fallback_locale: String,
    pub rtl_locales: Vec<String>,
    /// Show `missing_identifier_message` instead of echoing the identifier
    pub show_missing_identifier_message: bool,
    pub missing_identifier_message: String,
    /// Roots holding `<locale>/<namespace>.json` documents
    pub directories: Vec<PathBuf>,
    pub lookup_mode: LookupMode,
    /// Load every namespace eagerly at construction time
    pub preload: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: Option<String>,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> std::result::Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("I18N_LOOKUP").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Load settings from an explicit configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path.as_ref()))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Parse settings from a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        super::validation::validate_settings(self)
    }
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            supported_locales: vec!["en".to_string()],
            current_locale: "en".to_string(),
            fallback_locale: "en".to_string(),
            rtl_locales: ["ar", "dv", "fa", "he", "ku", "ps", "ur", "yi"]
                .iter()
                .map(|code| code.to_string())
                .collect(),
            show_missing_identifier_message: false,
            missing_identifier_message: "Missing Identifier".to_string(),
            directories: Vec::new(),
            lookup_mode: LookupMode::Namespaced,
            preload: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_path: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.i18n.current_locale, "en");
        assert_eq!(settings.i18n.fallback_locale, "en");
        assert_eq!(settings.i18n.lookup_mode, LookupMode::Namespaced);
        assert!(settings.i18n.rtl_locales.contains(&"ar".to_string()));
        assert!(!settings.i18n.show_missing_identifier_message);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_from_toml_str_fills_missing_fields() {
        let settings = Settings::from_toml_str(
            r#"
            [i18n]
            supported_locales = ["en", "ar"]
            current_locale = "ar"
            lookup_mode = "merged"
            directories = ["locales"]
            "#,
        )
        .unwrap();

        assert_eq!(settings.i18n.supported_locales, vec!["en", "ar"]);
        assert_eq!(settings.i18n.current_locale, "ar");
        assert_eq!(settings.i18n.fallback_locale, "en");
        assert_eq!(settings.i18n.lookup_mode, LookupMode::Merged);
        assert_eq!(settings.i18n.directories, vec![PathBuf::from("locales")]);
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_from_toml_str_rejects_unknown_mode() {
        let result = Settings::from_toml_str(
            r#"
            [i18n]
            lookup_mode = "flat"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lookup.toml");
        std::fs::write(
            &path,
            "[i18n]\nsupported_locales = [\"en\", \"de\"]\nfallback_locale = \"de\"\n\n[logging]\nlevel = \"debug\"\n",
        )
        .unwrap();

        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.i18n.fallback_locale, "de");
        assert_eq!(settings.logging.level, "debug");
    }
}
