//! Locale-tree providers
//!
//! A provider supplies namespace trees on demand. It is an optional
//! capability of [`crate::i18n::I18n`]: without one, lookups only see the
//! in-memory table.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use serde_json::Value;
use tracing::debug;
use crate::utils::errors::{LookupError, Result};
use super::value::LocalizationTree;

/// Source of localization trees for (locale, namespace) pairs
pub trait LocaleTreeProvider {
    /// Load one namespace tree; `Ok(None)` when it does not exist
    fn load_tree(&self, locale: &str, namespace: &str) -> Result<Option<LocalizationTree>>;

    /// Names of the namespaces available for a locale
    fn list_namespaces(&self, locale: &str) -> Result<Vec<String>>;
}

/// Reads `<root>/<locale>/<namespace>.json` documents from disk
///
/// Roots are consulted in order; the first one holding a namespace file wins.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    roots: Vec<PathBuf>,
}

impl JsonFileProvider {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    fn namespace_path(root: &Path, locale: &str, namespace: &str) -> PathBuf {
        root.join(locale).join(format!("{}.json", namespace))
    }
}

/// Parse a localization tree document
pub fn parse_tree(path: &Path, content: &str) -> Result<LocalizationTree> {
    match serde_json::from_str(content)? {
        Value::Object(tree) => Ok(tree),
        other => Err(LookupError::InvalidTree {
            path: path.to_path_buf(),
            reason: format!("expected an object at the root, found {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Reject names that would escape the locale directory
fn is_safe_component(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

impl LocaleTreeProvider for JsonFileProvider {
    fn load_tree(&self, locale: &str, namespace: &str) -> Result<Option<LocalizationTree>> {
        if !is_safe_component(locale) || !is_safe_component(namespace) {
            debug!(locale = locale, namespace = namespace, "Ignoring unsafe namespace path");
            return Ok(None);
        }

        for root in &self.roots {
            let path = Self::namespace_path(root, locale, namespace);
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            debug!(path = %path.display(), "Read localization tree");
            return parse_tree(&path, &content).map(Some);
        }

        Ok(None)
    }

    fn list_namespaces(&self, locale: &str) -> Result<Vec<String>> {
        let mut names = BTreeSet::new();
        if !is_safe_component(locale) {
            return Ok(Vec::new());
        }

        for root in &self.roots {
            let directory = root.join(locale);
            let entries = match fs::read_dir(&directory) {
                Ok(entries) => entries,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };

            for entry in entries {
                let path = entry?.path();
                if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                    continue;
                }
                if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                    names.insert(stem.to_string());
                }
            }
        }

        Ok(names.into_iter().collect())
    }
}
