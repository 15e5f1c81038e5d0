//! Identifier resolution
//!
//! Maps a dotted identifier onto a localization tree. A tree may store keys
//! that themselves contain dots (`"form.field.required"`), so the joined path
//! is always tried as a literal root key before nested traversal.
//!
//! Traversal is best-effort: when a step lands on something that cannot be
//! descended into (a message string, a number), that node is the result even
//! if path segments remain. `{"a": "x"}` resolves `a.b.c` to `"x"`.

use std::sync::Arc;
use serde_json::Value;
use crate::config::LookupMode;
use super::value::LocalizationTree;

/// Where a candidate tree comes from
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TierOrigin {
    /// The combined view of every namespace of a locale
    Merged { locale: String },
    /// A single namespace tree, loaded on demand
    Namespace { locale: String, namespace: String },
}

impl TierOrigin {
    pub fn locale(&self) -> &str {
        match self {
            TierOrigin::Merged { locale } | TierOrigin::Namespace { locale, .. } => locale,
        }
    }
}

/// An identifier split into its namespace and in-tree path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentifierParts<'a> {
    pub namespace: Option<&'a str>,
    pub path: Vec<&'a str>,
}

impl<'a> IdentifierParts<'a> {
    /// Split an identifier according to the lookup mode
    ///
    /// In namespaced mode the first segment names the namespace when the
    /// identifier has more than one segment. A single-segment identifier has
    /// no namespace and is looked up in the merged view only.
    pub fn parse(identifier: &'a str, mode: LookupMode) -> Self {
        let segments: Vec<&'a str> = identifier.split('.').collect();
        match mode {
            LookupMode::Namespaced if segments.len() > 1 => Self {
                namespace: Some(segments[0]),
                path: segments[1..].to_vec(),
            },
            _ => Self {
                namespace: None,
                path: segments,
            },
        }
    }

    /// The same path with its leading segment dropped
    ///
    /// Used in merged mode, where a leading segment may be a legacy namespace
    /// prefix.
    pub fn without_prefix(&self) -> Option<Self> {
        if self.path.len() < 2 {
            return None;
        }
        Some(Self {
            namespace: None,
            path: self.path[1..].to_vec(),
        })
    }
}

/// A value found in one of the tiers
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub value: Value,
    pub origin: TierOrigin,
}

/// Look up a path inside one tree
///
/// Returns `None` when the path leads nowhere. A JSON `null` counts as absent.
pub fn resolve_in_tree<'t>(tree: &'t LocalizationTree, path: &[&str]) -> Option<&'t Value> {
    let flat_key = path.join(".");
    if let Some(value) = tree.get(&flat_key) {
        return present(value);
    }

    let (first, rest) = path.split_first()?;
    let mut node = tree.get(*first)?;
    for segment in rest {
        match node {
            Value::Object(children) => node = children.get(*segment)?,
            _ => break,
        }
    }
    present(node)
}

fn present(value: &Value) -> Option<&Value> {
    if value.is_null() {
        None
    } else {
        Some(value)
    }
}

/// The tiers consulted for an identifier, in order
///
/// Fallback tiers are omitted when the fallback locale is the current one.
pub fn tier_plan(parts: &IdentifierParts<'_>, current: &str, fallback: &str) -> Vec<TierOrigin> {
    let mut locales = vec![current];
    if fallback != current {
        locales.push(fallback);
    }

    let mut plan = Vec::with_capacity(locales.len() * 2);
    for locale in locales {
        plan.push(TierOrigin::Merged {
            locale: locale.to_string(),
        });
        if let Some(namespace) = parts.namespace {
            plan.push(TierOrigin::Namespace {
                locale: locale.to_string(),
                namespace: namespace.to_string(),
            });
        }
    }
    plan
}

/// Walk the tiers in order and return the first hit
///
/// `fetch` supplies the tree for a tier and is only called when every earlier
/// tier missed, so it may load trees lazily.
pub fn resolve<F>(parts: &IdentifierParts<'_>, plan: &[TierOrigin], mut fetch: F) -> Option<Resolution>
where
    F: FnMut(&TierOrigin) -> Option<Arc<LocalizationTree>>,
{
    for origin in plan {
        let Some(tree) = fetch(origin) else {
            continue;
        };
        if let Some(value) = resolve_in_tree(&tree, &parts.path) {
            return Some(Resolution {
                value: value.clone(),
                origin: origin.clone(),
            });
        }
    }
    None
}
