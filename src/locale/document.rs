//! Locale document - one catalog of localized strings per (locale, brand).
//!
//! A document is a nested JSON mapping with fixed top-level sections.
//! Lookup walks dot-notation paths and reports misses as a tagged value
//! instead of an exception, so callers can tell "exact text" from
//! "fallback" without string sniffing.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

/// Top-level sections every served document is expected to carry.
pub const REQUIRED_SECTIONS: [&str; 9] = [
    "email",
    "perspectives",
    "formats",
    "ui",
    "api",
    "validation",
    "prompts",
    "common",
    "focus_areas",
];

/// Which link of the fallback chain produced a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentSource {
    /// The locale the caller asked for.
    Requested,
    /// The configured default locale, served because the requested one
    /// was not stored.
    DefaultLocale,
    /// The hardcoded minimal catalog, served because nothing was stored.
    Minimal,
}

/// Outcome of resolving a dotted path inside a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Found(String),
    /// The path that failed to resolve to a string leaf.
    Missing(String),
}

impl Resolved {
    #[allow(dead_code)]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing(_))
    }

    /// Render to the caller-facing string: the text itself, or the
    /// visibly-bracketed path for misses.
    pub fn render(self) -> String {
        match self {
            Self::Found(text) => text,
            Self::Missing(path) => format!("[{}]", path),
        }
    }
}

/// A resolved locale catalog. Cloning is cheap; the JSON tree is shared.
#[derive(Debug, Clone)]
pub struct LocaleDocument {
    /// Locale code this document serves (`Content-Language` value).
    pub locale: String,
    pub source: DocumentSource,
    root: Arc<Value>,
}

impl LocaleDocument {
    /// Wrap a stored JSON document, warning about missing sections.
    ///
    /// A missing section is not fatal: lookups under it degrade to
    /// bracketed placeholders.
    pub fn from_value(locale: &str, source: DocumentSource, root: Value) -> Self {
        for section in REQUIRED_SECTIONS {
            if root.get(section).is_none() {
                warn!(locale = %locale, section = %section, "locale document is missing a section");
            }
        }

        Self {
            locale: locale.to_string(),
            source,
            root: Arc::new(root),
        }
    }

    /// Resolve a dot-notation path to a string leaf.
    pub fn resolve(&self, path: &str) -> Resolved {
        let mut current: &Value = &self.root;
        for part in path.split('.') {
            match current.get(part) {
                Some(v) => current = v,
                None => return Resolved::Missing(path.to_string()),
            }
        }

        match current.as_str() {
            Some(text) if !text.is_empty() => Resolved::Found(text.to_string()),
            _ => Resolved::Missing(path.to_string()),
        }
    }

    /// Resolve a path and render it, interpolating `{{key}}` variables.
    ///
    /// Misses come back as the bracketed path and are logged; variables
    /// without a supplied value stay as literal `{{key}}` text.
    pub fn token(&self, path: &str, variables: Option<&HashMap<&str, String>>) -> String {
        let resolved = self.resolve(path);
        if let Resolved::Missing(ref missing) = resolved {
            warn!(locale = %self.locale, path = %missing, "missing translation key");
        }

        let text = resolved.render();
        match variables {
            Some(vars) => interpolate(&text, vars),
            None => text,
        }
    }
}

/// Replace every `{{key}}` occurrence with its value from `vars`.
///
/// Keys with no supplied value are left untouched, which makes the
/// operation idempotent for a fixed variable map.
pub fn interpolate(template: &str, vars: &HashMap<&str, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        let needle = format!("{{{{{}}}}}", key);
        if result.contains(&needle) {
            result = result.replace(&needle, value);
        }
    }
    result
}

/// Scan for `{{...}}` placeholders that survived interpolation.
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    let mut found = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                found.push(after[..end].to_string());
                rest = &after[end + 2..];
            }
            None => break,
        }
    }

    found
}
