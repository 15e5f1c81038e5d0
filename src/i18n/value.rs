//! Localization values
//!
//! A localization tree is a JSON object whose leaves are message templates or
//! pluralization records. Resolution produces a [`ResolvedValue`], a tagged
//! union the formatter switches on instead of inspecting object shape.

use serde_json::{Map, Value};

/// A nested mapping from key to subtree, message, or pluralization record
pub type LocalizationTree = Map<String, Value>;

/// Interpolation data; iteration order is insertion order
pub type TranslationData = Map<String, Value>;

/// Reserved keys marking a subtree as a pluralization record
pub const PLURAL_KEYS: [&str; 4] = ["zero", "one", "two", "other"];

/// The outcome of resolving an identifier
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    /// No tier holds the identifier
    Missing,
    /// A plain message template
    Text(String),
    /// A set of count-selected templates
    Plural(PluralForms),
    /// A node that is neither a message nor a pluralization record
    Malformed(String),
}

/// Templates of a pluralization record
///
/// A form that is present but not a string is kept as `None`, which makes it
/// fall through to `other` during selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluralForms {
    pub zero: Option<String>,
    pub one: Option<String>,
    pub two: Option<String>,
    pub other: Option<String>,
}

impl PluralForms {
    /// Build plural forms from a subtree, or `None` if it carries no plural key
    pub fn from_tree(tree: &LocalizationTree) -> Option<Self> {
        if !is_plural_record(tree) {
            return None;
        }

        let form = |key: &str| tree.get(key).and_then(Value::as_str).map(str::to_string);
        Some(Self {
            zero: form("zero"),
            one: form("one"),
            two: form("two"),
            other: form("other"),
        })
    }
}

/// Whether a subtree is recognized as a pluralization record
pub fn is_plural_record(tree: &LocalizationTree) -> bool {
    PLURAL_KEYS.iter().any(|key| tree.contains_key(*key))
}

impl ResolvedValue {
    /// Classify a raw tree node
    pub fn from_node(node: Option<&Value>) -> Self {
        match node {
            None | Some(Value::Null) => ResolvedValue::Missing,
            Some(Value::String(text)) => ResolvedValue::Text(text.clone()),
            Some(Value::Number(number)) => ResolvedValue::Text(number.to_string()),
            Some(Value::Bool(flag)) => ResolvedValue::Text(flag.to_string()),
            Some(Value::Object(tree)) => match PluralForms::from_tree(tree) {
                Some(forms) => ResolvedValue::Plural(forms),
                None => ResolvedValue::Malformed("object has no zero/one/two/other form".to_string()),
            },
            Some(Value::Array(_)) => ResolvedValue::Malformed("arrays are not messages".to_string()),
        }
    }

    /// Whether this value was found at all
    pub fn is_found(&self) -> bool {
        !matches!(self, ResolvedValue::Missing)
    }
}
