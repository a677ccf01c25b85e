//! Locale resolution and content catalog service.
//!
//! Resolves a (locale, brand) pair to a validated catalog with caching
//! and an explicit fallback chain, and provides token lookup with
//! variable interpolation. Designed to never surface a hard failure:
//! every miss degrades to the default locale, the minimal hardcoded
//! catalog, or a visibly-bracketed placeholder string.

pub mod document;
pub mod fallback;
pub mod perspective;
mod service;

pub use document::{DocumentSource, LocaleDocument, Resolved, interpolate, unresolved_placeholders};
pub use perspective::{PerspectiveProfile, apply_perspective_to_prompt, cultural_hint, profile};
pub use service::LocaleService;

use crate::models::Perspective;

/// Locale codes the pipeline serves.
pub const SUPPORTED_LOCALES: [&str; 2] = ["en-US", "es-ES"];

/// Set-membership check against the supported locale set.
pub fn is_valid_locale(code: &str) -> bool {
    SUPPORTED_LOCALES.contains(&code)
}

/// Set-membership check against the supported perspective set.
#[allow(dead_code)]
pub fn is_valid_perspective(name: &str) -> bool {
    Perspective::parse(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_membership() {
        assert!(is_valid_locale("en-US"));
        assert!(is_valid_locale("es-ES"));
        assert!(!is_valid_locale("fr-FR"));
        assert!(!is_valid_locale("en"));
        assert!(!is_valid_locale(""));
    }

    #[test]
    fn test_perspective_membership() {
        assert!(is_valid_perspective("calm"));
        assert!(is_valid_perspective("evidence"));
        assert!(!is_valid_perspective("Calm"));
        assert!(!is_valid_perspective("mystic"));
    }
}
