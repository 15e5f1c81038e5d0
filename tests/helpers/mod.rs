//! Test helpers module
//!
//! Builds on-disk locale fixtures and common configurations for the
//! integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use i18n_lookup::{I18nConfig, LookupMode, TranslationData};
use serde_json::Value;
use tempfile::TempDir;

/// A temporary `<locale>/<namespace>.json` tree
pub struct LocaleFixture {
    pub dir: TempDir,
}

impl LocaleFixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a namespace document from a JSON value
    pub fn namespace(self, locale: &str, namespace: &str, tree: Value) -> Self {
        let text = serde_json::to_string_pretty(&tree).expect("Failed to serialize fixture");
        self.raw(locale, namespace, &text)
    }

    /// Write a namespace document verbatim
    pub fn raw(self, locale: &str, namespace: &str, text: &str) -> Self {
        let directory = self.dir.path().join(locale);
        fs::create_dir_all(&directory).expect("Failed to create locale dir");
        fs::write(directory.join(format!("{}.json", namespace)), text)
            .expect("Failed to write fixture");
        self
    }
}

/// Configuration reading from `root` with en/de/ar supported
pub fn test_config(root: &Path, mode: LookupMode) -> I18nConfig {
    I18nConfig {
        supported_locales: vec!["en".to_string(), "de".to_string(), "ar".to_string()],
        directories: vec![root.to_path_buf()],
        lookup_mode: mode,
        ..Default::default()
    }
}

/// Interpolation data from a JSON object literal
pub fn data(value: Value) -> TranslationData {
    match value {
        Value::Object(map) => map,
        _ => panic!("test data must be an object"),
    }
}

/// The standard fixture shared by most tests
pub fn standard_fixture() -> LocaleFixture {
    LocaleFixture::new()
        .namespace(
            "en",
            "common",
            serde_json::json!({
                "save": "Save",
                "cancel": "Cancel",
                "greeting": "Hello {name}",
                "buttons": {"ok": "OK", "retry": "Retry"},
                "form.field.required": "This field is required",
                "files": {"zero": "No files", "one": "One file", "two": "A pair of files", "other": "{count} files"}
            }),
        )
        .namespace(
            "en",
            "errors",
            serde_json::json!({
                "network": "Network unavailable",
                "save": "Could not save"
            }),
        )
        .namespace(
            "de",
            "common",
            serde_json::json!({
                "save": "Speichern",
                "greeting": "Hallo {name}"
            }),
        )
        .namespace(
            "ar",
            "common",
            serde_json::json!({
                "save": "حفظ"
            }),
        )
}
