//! Fallback chain and the minimal hardcoded catalog.
//!
//! The fallback order is data, not control flow: `fallback_chain`
//! produces the ordered list of sources to try, and the service walks
//! it. The chain always ends in [`ChainLink::Minimal`], so locale
//! resolution cannot fail.

use serde_json::{Value, json};

use super::document::{DocumentSource, LocaleDocument};
use super::is_valid_locale;

/// One step of the locale fallback chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainLink {
    /// Fetch this locale's document from the store.
    Store {
        locale: String,
        source: DocumentSource,
    },
    /// Give up on the store and serve the hardcoded minimal catalog.
    Minimal,
}

/// Build the fallback chain for a requested locale:
/// `[requested, default, minimal]`, with unsupported or duplicate
/// entries dropped.
pub fn fallback_chain(requested: &str, default_locale: &str) -> Vec<ChainLink> {
    let mut chain = Vec::with_capacity(3);

    if is_valid_locale(requested) {
        chain.push(ChainLink::Store {
            locale: requested.to_string(),
            source: DocumentSource::Requested,
        });
    }

    if requested != default_locale {
        chain.push(ChainLink::Store {
            locale: default_locale.to_string(),
            source: DocumentSource::DefaultLocale,
        });
    }

    chain.push(ChainLink::Minimal);
    chain
}

/// Build the minimal English catalog served when no stored document can
/// be loaded. Covers every required section so downstream lookups keep
/// working, with generic copy rather than brand voice.
pub fn minimal_document(locale: &str) -> LocaleDocument {
    LocaleDocument::from_value(locale, DocumentSource::Minimal, minimal_catalog())
}

fn minimal_catalog() -> Value {
    json!({
        "email": {
            "welcome": {
                "subject": "Welcome, {{name}}",
                "heading": "Welcome",
                "intro": "Thank you for signing up.",
                "footer": "You are receiving this email because you signed up.",
                "unsubscribe": "Unsubscribe at {{unsubscribe_url}}"
            },
            "digest": {
                "subject": "Your {{content_type}} reading",
                "heading": "Your reading",
                "intro": "Here is your latest reading.",
                "footer": "Thank you for reading.",
                "unsubscribe": "Unsubscribe at {{unsubscribe_url}}"
            }
        },
        "perspectives": {
            "calm": "Calm",
            "knowledge": "Knowledge",
            "success": "Success",
            "evidence": "Evidence"
        },
        "formats": {
            "date_long": "%Y-%m-%d",
            "list_separator": ", ",
            "daily": "daily",
            "weekly": "weekly",
            "monthly": "monthly"
        },
        "ui": {
            "signup": {
                "email": "Email address",
                "submit": "Sign up",
                "perspective": "Reading style"
            },
            "preferences": {
                "title": "Preferences",
                "focus_areas": "Focus areas"
            }
        },
        "api": {
            "errors": {
                "notFound": "Not found.",
                "unauthorized": "Not authorized.",
                "rateLimited": "Too many requests.",
                "invalidInput": "Invalid input.",
                "emailExists": "This email address is already registered.",
                "paymentFailed": "Payment failed.",
                "internalError": "An internal error occurred."
            },
            "success": {
                "registered": "Registration received.",
                "composed": "Content composed.",
                "emailPreviewed": "Email preview rendered.",
                "cacheCleared": "Cache cleared.",
                "catalogStored": "Catalog stored.",
                "localesListed": "Stored locale catalogs."
            }
        },
        "validation": {
            "required": "This field is required.",
            "invalidFormat": "Invalid format.",
            "tooLong": "Too long.",
            "email": {
                "required": "Email address is required.",
                "invalidFormat": "Invalid email address."
            },
            "birthDate": {
                "invalidFormat": "Invalid birth date."
            }
        },
        "prompts": {
            "system": {
                "trial": "Write a short horoscope for the reader.",
                "free": "Write a short horoscope for the reader.",
                "basic": "Write a horoscope for the reader.",
                "pro": "Write a detailed horoscope for the reader."
            },
            "base": {
                "trial": "Today is {{date}}. The sun is in {{sun_sign}}. Write a brief reading for {{name}}.",
                "free": "Today is {{date}}. The sun is in {{sun_sign}} and the moon is in {{moon_sign}}. Write a reading for {{name}}.",
                "basic": "Today is {{date}}. The sun is in {{sun_sign}} and the moon is in {{moon_sign}}. Aspects: {{aspects}}. Write a reading for {{name}} focused on {{primary_focus}}.",
                "pro": "Today is {{date}}. The sun is in {{sun_sign}} and the moon is in {{moon_sign}}. Aspects: {{aspects}}. Retrogrades: {{retrogrades}}. Write a reading for {{name}} focused on {{primary_focus}}."
            },
            "perspectives": {
                "calm": "Keep the tone calm.",
                "knowledge": "Explain the reasoning.",
                "success": "Keep the tone encouraging.",
                "evidence": "Stay concrete."
            }
        },
        "common": {
            "brand": "Luminary",
            "tagline": "",
            "unknown": "Unknown",
            "no_retrogrades": "no retrograde planets currently",
            "gentle_aspects": "gentle cosmic harmony"
        },
        "focus_areas": {
            "love": "Love",
            "career": "Career",
            "wellness": "Wellness",
            "growth": "Growth",
            "finance": "Finance"
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locale::document::REQUIRED_SECTIONS;

    #[test]
    fn test_chain_for_supported_non_default_locale() {
        let chain = fallback_chain("es-ES", "en-US");
        assert_eq!(
            chain,
            vec![
                ChainLink::Store {
                    locale: "es-ES".to_string(),
                    source: DocumentSource::Requested,
                },
                ChainLink::Store {
                    locale: "en-US".to_string(),
                    source: DocumentSource::DefaultLocale,
                },
                ChainLink::Minimal,
            ]
        );
    }

    #[test]
    fn test_chain_for_default_locale_has_no_duplicate() {
        let chain = fallback_chain("en-US", "en-US");
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.last(), Some(&ChainLink::Minimal));
    }

    #[test]
    fn test_chain_for_unsupported_locale_skips_store_fetch() {
        let chain = fallback_chain("fr-FR", "en-US");
        assert_eq!(
            chain,
            vec![
                ChainLink::Store {
                    locale: "en-US".to_string(),
                    source: DocumentSource::DefaultLocale,
                },
                ChainLink::Minimal,
            ]
        );
    }

    #[test]
    fn test_minimal_document_covers_every_section() {
        let catalog = minimal_catalog();
        for section in REQUIRED_SECTIONS {
            assert!(
                catalog.get(section).is_some(),
                "minimal catalog is missing section {section}"
            );
        }
    }

    #[test]
    fn test_minimal_document_resolves_error_strings() {
        let doc = minimal_document("en-US");
        assert!(!doc.resolve("api.errors.internalError").is_missing());
        assert!(!doc.resolve("api.errors.emailExists").is_missing());
    }
}
