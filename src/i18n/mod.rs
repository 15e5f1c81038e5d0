//! Internationalization module
//!
//! This module resolves dotted identifiers against locale-keyed localization
//! trees and formats the result: nested namespaces, literal dotted keys,
//! locale fallback, pluralization, placeholder interpolation and text
//! direction.

pub mod formatter;
pub mod loader;
pub mod provider;
pub mod resolver;
pub mod table;
pub mod value;

// Re-export commonly used i18n components
pub use formatter::{MessageFormatter, MissingIdentifierPolicy};
pub use loader::{I18n, TextDirection};
pub use provider::{JsonFileProvider, LocaleTreeProvider};
pub use table::{LocaleStats, LocaleTable, TranslationStats};
pub use value::{LocalizationTree, PluralForms, ResolvedValue, TranslationData};
