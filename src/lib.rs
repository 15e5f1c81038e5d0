//! i18n-lookup
//!
//! A localization lookup library. Given a dotted identifier and optional
//! interpolation data it resolves a translated string from locale-keyed
//! localization trees, held in memory or loaded from JSON files on demand.
//!
//! ```
//! use i18n_lookup::{I18n, I18nConfig, LocaleTable};
//! use serde_json::json;
//!
//! let table = LocaleTable::from_json(json!({
//!     "en": {"general": {"welcome": "Welcome {name}"}}
//! })).unwrap();
//! let i18n = I18n::new(&I18nConfig::default()).with_table(table);
//!
//! let data = json!({"name": "John Doe"});
//! assert_eq!(
//!     i18n.translate("general.welcome", data.as_object()),
//!     "Welcome John Doe"
//! );
//! assert_eq!(i18n.translate("general.missing", None), "general.missing");
//! ```

pub mod config;
pub mod i18n;
pub mod utils;

// Re-export commonly used types
pub use config::{I18nConfig, LookupMode, Settings};
pub use utils::errors::{LookupError, Result};
pub use i18n::{I18n, LocaleTable, TextDirection, TranslationData};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
