//! Locale table
//!
//! Holds every loaded localization tree, keyed by locale. Each locale keeps
//! its namespace trees and a merged view built by successive overwrite of
//! their top-level keys, so the most recently inserted namespace wins on
//! conflicts.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use serde_json::Value;
use crate::utils::errors::{LookupError, Result};
use super::value::{is_plural_record, LocalizationTree};

/// The cached state of one (locale, namespace) pair
#[derive(Debug, Clone, PartialEq)]
pub enum NamespaceSlot {
    Loaded(Arc<LocalizationTree>),
    /// Looked up before and not available; not retried
    Absent,
}

#[derive(Debug, Clone, Default)]
struct LocaleEntry {
    namespaces: BTreeMap<String, NamespaceSlot>,
    merged: Arc<LocalizationTree>,
}

/// Localization trees for every locale
#[derive(Debug, Clone, Default)]
pub struct LocaleTable {
    locales: HashMap<String, LocaleEntry>,
}

impl LocaleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a JSON object of `{ locale: tree }`
    pub fn from_json(value: Value) -> Result<Self> {
        let Value::Object(locales) = value else {
            return Err(LookupError::Config(
                "Locale table must be an object keyed by locale".to_string()
            ));
        };

        let mut table = Self::new();
        for (locale, tree) in locales {
            match tree {
                Value::Object(tree) => table.insert_tree(&locale, tree),
                _ => {
                    return Err(LookupError::Config(
                        format!("Localization tree for '{}' must be an object", locale)
                    ))
                }
            }
        }
        Ok(table)
    }

    /// Store a namespace tree and merge it into the locale's merged view
    pub fn insert_namespace(&mut self, locale: &str, namespace: &str, tree: LocalizationTree) {
        let entry = self.locales.entry(locale.to_string()).or_default();
        merge_into(Arc::make_mut(&mut entry.merged), &tree);
        entry
            .namespaces
            .insert(namespace.to_string(), NamespaceSlot::Loaded(Arc::new(tree)));
    }

    /// Remember that a namespace could not be loaded
    pub fn mark_absent(&mut self, locale: &str, namespace: &str) {
        self.locales
            .entry(locale.to_string())
            .or_default()
            .namespaces
            .entry(namespace.to_string())
            .or_insert(NamespaceSlot::Absent);
    }

    /// Merge an in-memory tree into a locale
    ///
    /// Root keys holding plain subtrees also become namespace slots, replacing
    /// any earlier slot of that name, so `general.title` resolves in namespaced
    /// mode against `{"general": {"title": ..}}` and both views agree on the
    /// last write.
    pub fn insert_tree(&mut self, locale: &str, tree: LocalizationTree) {
        let entry = self.locales.entry(locale.to_string()).or_default();
        for (key, value) in &tree {
            if let Value::Object(subtree) = value {
                if !is_plural_record(subtree) {
                    entry
                        .namespaces
                        .insert(key.clone(), NamespaceSlot::Loaded(Arc::new(subtree.clone())));
                }
            }
        }
        merge_into(Arc::make_mut(&mut entry.merged), &tree);
    }

    /// The merged view of a locale
    pub fn merged(&self, locale: &str) -> Option<Arc<LocalizationTree>> {
        self.locales.get(locale).map(|entry| entry.merged.clone())
    }

    /// The cached slot for a namespace, if it was ever looked up
    pub fn namespace(&self, locale: &str, namespace: &str) -> Option<&NamespaceSlot> {
        self.locales.get(locale)?.namespaces.get(namespace)
    }

    /// Whether any tree is stored for the locale
    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Locale codes present in the table, sorted
    pub fn locales(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Loaded namespace names of a locale, sorted
    pub fn namespaces(&self, locale: &str) -> Vec<&str> {
        self.locales
            .get(locale)
            .map(|entry| {
                entry
                    .namespaces
                    .iter()
                    .filter(|(_, slot)| matches!(slot, NamespaceSlot::Loaded(_)))
                    .map(|(name, _)| name.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get translation statistics
    pub fn stats(&self, default_locale: &str) -> TranslationStats {
        let mut stats = TranslationStats {
            locales: Vec::new(),
            total_keys: 0,
        };

        for code in self.locales() {
            let Some(entry) = self.locales.get(code) else {
                continue;
            };
            let key_count = count_keys(&entry.merged);
            stats.locales.push(LocaleStats {
                code: code.to_string(),
                namespaces: self.namespaces(code).len(),
                key_count,
            });
            if code == default_locale {
                stats.total_keys = key_count;
            }
        }

        stats
    }
}

fn merge_into(target: &mut LocalizationTree, source: &LocalizationTree) {
    for (key, value) in source {
        target.insert(key.clone(), value.clone());
    }
}

/// Recursively count translatable leaves; a plural record counts once
pub fn count_keys(tree: &LocalizationTree) -> usize {
    tree.values()
        .map(|value| match value {
            Value::Object(nested) if !is_plural_record(nested) => count_keys(nested),
            _ => 1,
        })
        .sum()
}

/// Translation statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationStats {
    pub locales: Vec<LocaleStats>,
    /// Leaf count of the default locale
    pub total_keys: usize,
}

/// Locale-specific statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleStats {
    pub code: String,
    pub namespaces: usize,
    pub key_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(value: Value) -> LocalizationTree {
        match value {
            Value::Object(map) => map,
            _ => panic!("test tree must be an object"),
        }
    }

    #[test]
    fn test_merged_view_last_write_wins() {
        let mut table = LocaleTable::new();
        table.insert_namespace("en", "common", tree(json!({"save": "Save", "cancel": "Cancel"})));
        table.insert_namespace("en", "forms", tree(json!({"save": "Submit"})));

        let merged = table.merged("en").unwrap();
        assert_eq!(merged.get("save"), Some(&json!("Submit")));
        assert_eq!(merged.get("cancel"), Some(&json!("Cancel")));
        assert_eq!(table.namespaces("en"), vec!["common", "forms"]);
    }

    #[test]
    fn test_mark_absent_does_not_replace_loaded() {
        let mut table = LocaleTable::new();
        table.insert_namespace("en", "common", tree(json!({"a": "A"})));
        table.mark_absent("en", "common");
        table.mark_absent("en", "missing");

        assert!(matches!(table.namespace("en", "common"), Some(NamespaceSlot::Loaded(_))));
        assert_eq!(table.namespace("en", "missing"), Some(&NamespaceSlot::Absent));
        assert_eq!(table.namespace("en", "other"), None);
        assert_eq!(table.namespaces("en"), vec!["common"]);
    }

    #[test]
    fn test_insert_tree_registers_namespaces() {
        let mut table = LocaleTable::new();
        table.insert_tree(
            "en",
            tree(json!({
                "general": {"title": "Title"},
                "items": {"one": "1 item", "other": "{count} items"},
                "plain": "Plain"
            })),
        );

        assert_eq!(table.namespaces("en"), vec!["general"]);
        let merged = table.merged("en").unwrap();
        assert_eq!(merged.get("plain"), Some(&json!("Plain")));
        assert!(merged.contains_key("general"));
    }

    #[test]
    fn test_insert_tree_twice_last_write_wins() {
        use crate::config::{I18nConfig, LookupMode};
        use crate::i18n::loader::I18n;

        let mut table = LocaleTable::new();
        table.insert_tree("en", tree(json!({"general": {"title": "Old"}})));
        table.insert_tree("en", tree(json!({"general": {"title": "New"}})));

        match table.namespace("en", "general") {
            Some(NamespaceSlot::Loaded(slot)) => assert_eq!(slot.get("title"), Some(&json!("New"))),
            other => panic!("expected loaded namespace, got {:?}", other),
        }
        assert_eq!(
            table.merged("en").unwrap().get("general"),
            Some(&json!({"title": "New"}))
        );

        for mode in [LookupMode::Namespaced, LookupMode::Merged] {
            let config = I18nConfig {
                lookup_mode: mode,
                ..Default::default()
            };
            let i18n = I18n::new(&config).with_table(table.clone());
            assert_eq!(i18n.translate("general.title", None), "New", "mode {:?}", mode);
        }
    }

    #[test]
    fn test_insert_tree_replaces_loaded_namespace() {
        let mut table = LocaleTable::new();
        table.insert_namespace("en", "general", tree(json!({"title": "From file"})));
        table.mark_absent("en", "extra");
        table.insert_tree("en", tree(json!({"general": {"title": "In memory"}, "extra": {"a": "A"}})));

        assert_eq!(table.namespaces("en"), vec!["extra", "general"]);
        match table.namespace("en", "general") {
            Some(NamespaceSlot::Loaded(slot)) => assert_eq!(slot.get("title"), Some(&json!("In memory"))),
            other => panic!("expected loaded namespace, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json() {
        let table = LocaleTable::from_json(json!({
            "en": {"hello": "Hello"},
            "ar": {"hello": "مرحبا"}
        }))
        .unwrap();
        assert_eq!(table.locales(), vec!["ar", "en"]);
        assert!(table.has_locale("ar"));

        assert!(LocaleTable::from_json(json!(["en"])).is_err());
        assert!(LocaleTable::from_json(json!({"en": "Hello"})).is_err());
    }

    #[test]
    fn test_count_keys() {
        let t = tree(json!({
            "a": "A",
            "b": {"c": "C", "d": {"e": "E"}},
            "items": {"one": "1", "other": "n"}
        }));
        assert_eq!(count_keys(&t), 4);
    }

    #[test]
    fn test_stats() {
        let mut table = LocaleTable::new();
        table.insert_namespace("en", "common", tree(json!({"a": "A", "b": "B"})));
        table.insert_namespace("de", "common", tree(json!({"a": "A"})));

        let stats = table.stats("en");
        assert_eq!(stats.total_keys, 2);
        assert_eq!(
            stats.locales,
            vec![
                LocaleStats { code: "de".into(), namespaces: 1, key_count: 1 },
                LocaleStats { code: "en".into(), namespaces: 1, key_count: 2 },
            ]
        );
    }
}
