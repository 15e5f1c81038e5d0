//! Translation loader and i18n management
//!
//! This module provides the [`I18n`] facade: it owns the locale settings and
//! the locale table, loads namespace trees on demand through an optional
//! provider, and composes identifier resolution with message formatting.
//!
//! An `I18n` is meant for single-threaded use. Lookups take `&self` and only
//! write to the table to memoize namespace loads.

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;
use serde_json::Value;
use tracing::{debug, info, warn};
use crate::config::{I18nConfig, LookupMode};
use crate::utils::logging::{
    log_load_failure, log_locale_rejected, log_missing_identifier, log_namespace_loaded,
};
use super::formatter::{MessageFormatter, MissingIdentifierPolicy};
use super::provider::{JsonFileProvider, LocaleTreeProvider};
use super::resolver::{resolve, tier_plan, IdentifierParts, Resolution, TierOrigin};
use super::table::{count_keys, LocaleTable, NamespaceSlot, TranslationStats};
use super::value::{LocalizationTree, ResolvedValue, TranslationData};

/// Writing direction of a locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

impl fmt::Display for TextDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main internationalization manager
pub struct I18n {
    supported_locales: Vec<String>,
    current_locale: String,
    fallback_locale: String,
    rtl_locales: Vec<String>,
    lookup_mode: LookupMode,
    formatter: MessageFormatter,
    table: RefCell<LocaleTable>,
    provider: Option<Box<dyn LocaleTreeProvider>>,
}

impl fmt::Debug for I18n {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I18n")
            .field("supported_locales", &self.supported_locales)
            .field("current_locale", &self.current_locale)
            .field("fallback_locale", &self.fallback_locale)
            .field("lookup_mode", &self.lookup_mode)
            .field("has_provider", &self.provider.is_some())
            .finish()
    }
}

impl I18n {
    /// Create an in-memory I18n instance
    ///
    /// An unsupported `current_locale` is replaced by the fallback locale.
    pub fn new(config: &I18nConfig) -> Self {
        let mut current_locale = config.current_locale.clone();
        if !config.supported_locales.contains(&current_locale) {
            warn!(
                requested = %current_locale,
                fallback = %config.fallback_locale,
                "Configured locale is not supported, starting on fallback locale"
            );
            current_locale = config.fallback_locale.clone();
        }

        Self {
            supported_locales: config.supported_locales.clone(),
            current_locale,
            fallback_locale: config.fallback_locale.clone(),
            rtl_locales: config.rtl_locales.clone(),
            lookup_mode: config.lookup_mode,
            formatter: MessageFormatter::new(MissingIdentifierPolicy {
                show_message: config.show_missing_identifier_message,
                message: config.missing_identifier_message.clone(),
            }),
            table: RefCell::new(LocaleTable::new()),
            provider: None,
        }
    }

    /// Create an I18n instance wired to the configured directories
    ///
    /// Merged mode, or `preload = true`, loads every namespace up front.
    /// Unreadable directories and files are logged and skipped.
    pub fn from_config(config: &I18nConfig) -> Self {
        let mut i18n = Self::new(config);
        if !config.directories.is_empty() {
            i18n = i18n.with_provider(JsonFileProvider::new(config.directories.iter().cloned()));
        }

        if config.preload || config.lookup_mode == LookupMode::Merged {
            let loaded = i18n.preload();
            info!(namespaces = loaded, "Preloaded translations");
        }
        i18n
    }

    /// Attach a locale-tree provider
    pub fn with_provider(mut self, provider: impl LocaleTreeProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Replace the locale table with a pre-supplied one
    pub fn with_table(self, table: LocaleTable) -> Self {
        self.table.replace(table);
        self
    }

    /// Add an in-memory namespace tree for a locale
    pub fn add_namespace(&self, locale: &str, namespace: &str, tree: LocalizationTree) {
        self.table.borrow_mut().insert_namespace(locale, namespace, tree);
    }

    /// Load every namespace of every supported locale from the provider
    ///
    /// Returns the number of namespaces newly loaded.
    pub fn preload(&self) -> usize {
        let Some(provider) = self.provider.as_deref() else {
            return 0;
        };

        let mut loaded = 0;
        for locale in &self.supported_locales {
            let namespaces = match provider.list_namespaces(locale) {
                Ok(namespaces) => namespaces,
                Err(e) => {
                    log_load_failure(locale, "*", &e);
                    continue;
                }
            };

            for namespace in namespaces {
                let known = self.table.borrow().namespace(locale, &namespace).is_some();
                if !known && self.load_namespace(provider, locale, &namespace).is_some() {
                    loaded += 1;
                }
            }
        }
        loaded
    }

    /// Load one namespace, memoizing the outcome either way
    fn load_namespace(
        &self,
        provider: &dyn LocaleTreeProvider,
        locale: &str,
        namespace: &str,
    ) -> Option<Arc<LocalizationTree>> {
        match provider.load_tree(locale, namespace) {
            Ok(Some(tree)) => {
                log_namespace_loaded(locale, namespace, count_keys(&tree));
                let mut table = self.table.borrow_mut();
                table.insert_namespace(locale, namespace, tree);
                match table.namespace(locale, namespace) {
                    Some(NamespaceSlot::Loaded(tree)) => Some(tree.clone()),
                    _ => None,
                }
            }
            Ok(None) => {
                debug!(locale = locale, namespace = namespace, "Namespace not available");
                self.table.borrow_mut().mark_absent(locale, namespace);
                None
            }
            Err(e) => {
                log_load_failure(locale, namespace, &e);
                self.table.borrow_mut().mark_absent(locale, namespace);
                None
            }
        }
    }

    /// The tree backing one tier, loading namespaces lazily
    fn tier_tree(&self, origin: &TierOrigin) -> Option<Arc<LocalizationTree>> {
        match origin {
            TierOrigin::Merged { locale } => self.table.borrow().merged(locale),
            TierOrigin::Namespace { locale, namespace } => {
                let cached = self.table.borrow().namespace(locale, namespace).cloned();
                match cached {
                    Some(NamespaceSlot::Loaded(tree)) => Some(tree),
                    Some(NamespaceSlot::Absent) => None,
                    None => {
                        let provider = self.provider.as_deref()?;
                        self.load_namespace(provider, locale, namespace)
                    }
                }
            }
        }
    }

    fn resolve_parts(&self, parts: &IdentifierParts<'_>) -> Option<Resolution> {
        let plan = tier_plan(parts, &self.current_locale, &self.fallback_locale);
        resolve(parts, &plan, |origin| self.tier_tree(origin))
    }

    /// Resolve an identifier to its raw value
    pub fn resolve(&self, identifier: &str) -> ResolvedValue {
        let parts = IdentifierParts::parse(identifier, self.lookup_mode);
        let mut resolution = self.resolve_parts(&parts);

        // Merged mode also accepts identifiers carrying a legacy namespace prefix.
        if resolution.is_none() && self.lookup_mode == LookupMode::Merged {
            if let Some(stripped) = parts.without_prefix() {
                resolution = self.resolve_parts(&stripped);
            }
        }

        match resolution {
            Some(found) => {
                if found.origin.locale() != self.current_locale {
                    debug!(
                        identifier = identifier,
                        locale = found.origin.locale(),
                        "Resolved identifier from fallback locale"
                    );
                }
                ResolvedValue::from_node(Some(&found.value))
            }
            None => ResolvedValue::Missing,
        }
    }

    /// Get a translated message
    pub fn translate(&self, identifier: &str, data: Option<&TranslationData>) -> String {
        let value = self.resolve(identifier);
        if !value.is_found() {
            log_missing_identifier(identifier, &self.current_locale);
        }
        self.formatter.format(identifier, &value, data)
    }

    /// Get a translated message with pluralization support
    ///
    /// `count` is added to (or replaces the `count` entry of) `data`.
    pub fn translate_plural(&self, identifier: &str, count: i64, data: Option<&TranslationData>) -> String {
        let mut final_data = data.cloned().unwrap_or_default();
        final_data.insert("count".to_string(), Value::from(count));
        self.translate(identifier, Some(&final_data))
    }

    /// Check whether an identifier resolves in any tier
    pub fn identifier_exists(&self, identifier: &str) -> bool {
        self.resolve(identifier).is_found()
    }

    /// Switch the current locale
    ///
    /// Unsupported codes are logged and leave the current locale unchanged.
    pub fn set_current_locale(&mut self, code: &str) -> bool {
        if !self.is_supported(code) {
            log_locale_rejected(code, &self.current_locale);
            return false;
        }

        info!(locale = code, "Current locale changed");
        self.current_locale = code.to_string();
        true
    }

    /// Check if a locale is supported
    pub fn is_supported(&self, code: &str) -> bool {
        self.supported_locales.iter().any(|supported| supported == code)
    }

    /// Check if a locale is written right-to-left
    pub fn is_rtl(&self, code: &str) -> bool {
        self.rtl_locales.iter().any(|rtl| rtl == code)
    }

    pub fn current_locale_is_rtl(&self) -> bool {
        self.is_rtl(&self.current_locale)
    }

    pub fn text_direction(&self) -> TextDirection {
        if self.current_locale_is_rtl() {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        }
    }

    /// Detect a supported locale from a language tag
    ///
    /// An exact match wins, then the primary subtag (`"en-US"` -> `"en"`).
    /// Anything else maps to the current locale.
    pub fn detect_locale(&self, tag: Option<&str>) -> String {
        if let Some(tag) = tag {
            if self.is_supported(tag) {
                return tag.to_string();
            }

            let primary = tag.split(['-', '_']).next().unwrap_or(tag);
            if self.is_supported(primary) {
                return primary.to_string();
            }
        }

        self.current_locale.clone()
    }

    pub fn current_locale(&self) -> &str {
        &self.current_locale
    }

    pub fn fallback_locale(&self) -> &str {
        &self.fallback_locale
    }

    pub fn supported_locales(&self) -> &[String] {
        &self.supported_locales
    }

    pub fn lookup_mode(&self) -> LookupMode {
        self.lookup_mode
    }

    /// Get translation statistics for the loaded trees
    pub fn stats(&self) -> TranslationStats {
        self.table.borrow().stats(&self.fallback_locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::Result;
    use serde_json::json;

    fn tree(value: Value) -> LocalizationTree {
        match value {
            Value::Object(map) => map,
            _ => panic!("test tree must be an object"),
        }
    }

    fn data(value: Value) -> TranslationData {
        match value {
            Value::Object(map) => map,
            _ => panic!("test data must be an object"),
        }
    }

    fn create_test_config() -> I18nConfig {
        I18nConfig {
            supported_locales: vec!["en".to_string(), "ar".to_string(), "de".to_string()],
            ..Default::default()
        }
    }

    /// Counts every load call
    struct CountingProvider {
        calls: Arc<std::sync::atomic::AtomicUsize>,
    }

    impl LocaleTreeProvider for CountingProvider {
        fn load_tree(&self, _locale: &str, namespace: &str) -> Result<Option<LocalizationTree>> {
            self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            if namespace == "common" {
                Ok(Some(tree(json!({"save": "Save"}))))
            } else {
                Ok(None)
            }
        }

        fn list_namespaces(&self, _locale: &str) -> Result<Vec<String>> {
            Ok(vec!["common".to_string()])
        }
    }

    #[test]
    fn test_translate_nested_identifier() {
        let i18n = I18n::new(&create_test_config());
        i18n.table
            .borrow_mut()
            .insert_tree("en", tree(json!({"general": {"Hello_World": "Hello World"}})));

        assert_eq!(i18n.translate("general.Hello_World", None), "Hello World");
    }

    #[test]
    fn test_translate_missing_identifier() {
        let i18n = I18n::new(&create_test_config());
        assert_eq!(i18n.translate("general.Hello_World", None), "general.Hello_World");

        let mut config = create_test_config();
        config.show_missing_identifier_message = true;
        let i18n = I18n::new(&config);
        assert_eq!(i18n.translate("general.Hello_World", None), "Missing Identifier");
    }

    #[test]
    fn test_fallback_locale() {
        let mut i18n = I18n::new(&create_test_config());
        i18n.add_namespace("en", "common", tree(json!({"save": "Save", "cancel": "Cancel"})));
        i18n.add_namespace("de", "common", tree(json!({"save": "Speichern"})));

        assert!(i18n.set_current_locale("de"));
        assert_eq!(i18n.translate("common.save", None), "Speichern");
        assert_eq!(i18n.translate("common.cancel", None), "Cancel");
    }

    #[test]
    fn test_namespace_loaded_once() {
        let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let i18n = I18n::new(&create_test_config()).with_provider(CountingProvider {
            calls: calls.clone(),
        });

        assert_eq!(i18n.translate("common.save", None), "Save");
        assert_eq!(i18n.translate("common.save", None), "Save");
        assert_eq!(i18n.translate("other.key", None), "other.key");
        assert_eq!(i18n.translate("other.key", None), "other.key");

        // en/common once, en/other once (memoized as absent)
        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 2);
    }

    #[test]
    fn test_preload_counts_new_namespaces() {
        let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let i18n = I18n::new(&create_test_config()).with_provider(CountingProvider {
            calls: calls.clone(),
        });

        assert_eq!(i18n.preload(), 3);
        assert_eq!(i18n.preload(), 0);
        assert_eq!(i18n.stats().locales.len(), 3);
    }

    #[test]
    fn test_from_config_with_unreadable_directory() {
        let mut config = create_test_config();
        config.directories = vec![std::path::PathBuf::from("/nonexistent/i18n-lookup/locales")];
        config.lookup_mode = LookupMode::Merged;

        let i18n = I18n::from_config(&config);
        assert!(i18n.stats().locales.is_empty());
        assert_eq!(i18n.translate("common.save", None), "common.save");

        i18n.add_namespace("en", "common", tree(json!({"save": "Save"})));
        assert_eq!(i18n.translate("common.save", None), "Save");
    }

    #[test]
    fn test_set_current_locale_rejects_unsupported() {
        let mut i18n = I18n::new(&create_test_config());
        assert!(!i18n.set_current_locale("xx"));
        assert_eq!(i18n.current_locale(), "en");
        assert!(i18n.set_current_locale("ar"));
        assert_eq!(i18n.current_locale(), "ar");
    }

    #[test]
    fn test_text_direction() {
        let mut i18n = I18n::new(&create_test_config());
        assert_eq!(i18n.text_direction(), TextDirection::Ltr);
        assert!(!i18n.current_locale_is_rtl());

        i18n.set_current_locale("ar");
        assert_eq!(i18n.text_direction(), TextDirection::Rtl);
        assert_eq!(i18n.text_direction().to_string(), "rtl");
        assert!(i18n.current_locale_is_rtl());
    }

    #[test]
    fn test_unsupported_configured_locale_starts_on_fallback() {
        let mut config = create_test_config();
        config.current_locale = "fr".to_string();
        let i18n = I18n::new(&config);
        assert_eq!(i18n.current_locale(), "en");
    }

    #[test]
    fn test_locale_detection() {
        let i18n = I18n::new(&create_test_config());

        assert_eq!(i18n.detect_locale(Some("en-US")), "en");
        assert_eq!(i18n.detect_locale(Some("de_AT")), "de");
        assert_eq!(i18n.detect_locale(Some("ar")), "ar");
        assert_eq!(i18n.detect_locale(Some("fr")), "en");
        assert_eq!(i18n.detect_locale(None), "en");
    }

    #[test]
    fn test_translate_plural() {
        let i18n = I18n::new(&create_test_config());
        i18n.add_namespace(
            "en",
            "inbox",
            tree(json!({"messages": {"zero": "No messages", "one": "One message", "other": "{count} messages for {name}"}})),
        );

        let d = data(json!({"name": "Ana"}));
        assert_eq!(i18n.translate_plural("inbox.messages", 0, Some(&d)), "No messages");
        assert_eq!(i18n.translate_plural("inbox.messages", 1, None), "One message");
        assert_eq!(i18n.translate_plural("inbox.messages", 7, Some(&d)), "7 messages for Ana");
    }

    #[test]
    fn test_identifier_exists() {
        let i18n = I18n::new(&create_test_config());
        i18n.add_namespace("en", "common", tree(json!({"save": "Save", "empty": ""})));

        assert!(i18n.identifier_exists("common.save"));
        assert!(i18n.identifier_exists("common.empty"));
        assert!(!i18n.identifier_exists("common.load"));
    }
}
