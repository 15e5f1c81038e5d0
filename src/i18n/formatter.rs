//! Message formatting
//!
//! Turns a resolved value into a display string: plural form selection by
//! count, then `{placeholder}` substitution from interpolation data.
//!
//! Placeholder names are ASCII word characters. A placeholder whose name is
//! absent from the data is replaced with the empty string, as is a `null`
//! value. Without any data the template is returned untouched.

use std::borrow::Cow;
use std::sync::OnceLock;
use regex::{Captures, Regex};
use serde_json::Value;
use thiserror::Error;
use crate::utils::logging::log_malformed_plural;
use super::value::{PluralForms, ResolvedValue, TranslationData};

/// Why a resolved value could not be formatted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("identifier not found")]
    NotFound,

    #[error("not a pluralization record: {0}")]
    NotPluralRecord(String),

    #[error("pluralization record has no string 'other' form")]
    MissingOtherForm,
}

/// What to display when an identifier or a plural form cannot be produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingIdentifierPolicy {
    pub show_message: bool,
    pub message: String,
}

impl MissingIdentifierPolicy {
    /// Display string for an identifier no tier could resolve
    pub fn not_found(&self, identifier: &str) -> String {
        if self.show_message {
            self.message.clone()
        } else {
            identifier.to_string()
        }
    }

    /// Display string for a value that exists but cannot be formatted
    pub fn unformattable(&self) -> String {
        if self.show_message {
            self.message.clone()
        } else {
            String::new()
        }
    }
}

impl Default for MissingIdentifierPolicy {
    fn default() -> Self {
        Self {
            show_message: false,
            message: "Missing Identifier".to_string(),
        }
    }
}

/// Formats resolved values, degrading failures per the missing-identifier policy
#[derive(Debug, Clone, Default)]
pub struct MessageFormatter {
    policy: MissingIdentifierPolicy,
}

impl MessageFormatter {
    pub fn new(policy: MissingIdentifierPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &MissingIdentifierPolicy {
        &self.policy
    }

    /// Format a value resolved for `identifier`; never fails
    pub fn format(&self, identifier: &str, value: &ResolvedValue, data: Option<&TranslationData>) -> String {
        match format_value(value, data) {
            Ok(text) => text,
            Err(FormatError::NotFound) => self.policy.not_found(identifier),
            Err(e) => {
                log_malformed_plural(identifier, &e.to_string());
                self.policy.unformattable()
            }
        }
    }
}

/// Format a resolved value
pub fn format_value(value: &ResolvedValue, data: Option<&TranslationData>) -> Result<String, FormatError> {
    match value {
        ResolvedValue::Missing => Err(FormatError::NotFound),
        ResolvedValue::Text(template) => Ok(interpolate(template, data)),
        ResolvedValue::Plural(forms) => {
            let template = select_plural_form(forms, plural_count(data))?;
            Ok(interpolate(template, data))
        }
        ResolvedValue::Malformed(reason) => Err(FormatError::NotPluralRecord(reason.clone())),
    }
}

/// The count used for plural selection
///
/// An explicit `count` entry wins; otherwise the first entry in insertion
/// order. Non-numeric values and absent data count as zero.
pub fn plural_count(data: Option<&TranslationData>) -> f64 {
    let Some(data) = data else {
        return 0.0;
    };

    data.get("count")
        .or_else(|| data.values().next())
        .and_then(numeric_value)
        .unwrap_or(0.0)
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Pick the template for `count`, falling back to `other`
pub fn select_plural_form(forms: &PluralForms, count: f64) -> Result<&str, FormatError> {
    let specific = if count == 0.0 {
        forms.zero.as_deref()
    } else if count == 1.0 {
        forms.one.as_deref()
    } else if count == 2.0 {
        forms.two.as_deref()
    } else {
        None
    };

    specific
        .or(forms.other.as_deref())
        .ok_or(FormatError::MissingOtherForm)
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder pattern is valid"))
}

/// Replace every `{key}` token with the matching data value
pub fn interpolate(template: &str, data: Option<&TranslationData>) -> String {
    let Some(data) = data else {
        return template.to_string();
    };

    placeholder_pattern()
        .replace_all(template, |caps: &Captures<'_>| display_value(data.get(&caps[1])))
        .into_owned()
}

fn display_value(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(Value::String(text)) => Cow::Borrowed(text.as_str()),
        Some(Value::Number(number)) => Cow::Owned(display_number(number)),
        Some(other) => Cow::Owned(other.to_string()),
    }
}

/// Integral floats print without a fractional part, matching plural selection
fn display_number(number: &serde_json::Number) -> String {
    match number.as_f64() {
        Some(float) if number.is_f64() && float.fract() == 0.0 && float.abs() < 1e15 => {
            format!("{}", float as i64)
        }
        _ => number.to_string(),
    }
}
