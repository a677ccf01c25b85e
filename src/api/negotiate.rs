//! Request locale negotiation.

use axum::http::{HeaderMap, header};

use crate::locale::{SUPPORTED_LOCALES, is_valid_locale};

/// Custom header carrying an explicit locale choice.
pub const USER_LOCALE_HEADER: &str = "x-user-locale";

/// Resolve the locale for a request.
///
/// `Accept-Language` is matched best-effort: the supported language
/// whose primary subtag appears earliest in the header wins. The
/// `X-User-Locale` header is an exact match against the supported set.
/// Anything else yields the configured default.
pub fn extract_locale(headers: &HeaderMap, default_locale: &str) -> String {
    if let Some(accept) = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
    {
        let mut best: Option<(usize, &str)> = None;
        for locale in SUPPORTED_LOCALES {
            let language = locale.split('-').next().unwrap_or(locale);
            if let Some(position) = accept.find(language) {
                if best.is_none_or(|(earliest, _)| position < earliest) {
                    best = Some((position, locale));
                }
            }
        }
        if let Some((_, locale)) = best {
            return locale.to_string();
        }
    }

    if let Some(custom) = headers
        .get(USER_LOCALE_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        if is_valid_locale(custom) {
            return custom.to_string();
        }
    }

    default_locale.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(
                axum::http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn test_accept_language_picks_earliest_supported() {
        let h = headers(&[("accept-language", "es-ES,en;q=0.8")]);
        assert_eq!(extract_locale(&h, "en-US"), "es-ES");

        let h = headers(&[("accept-language", "en-GB,es;q=0.5")]);
        assert_eq!(extract_locale(&h, "en-US"), "en-US");
    }

    #[test]
    fn test_unsupported_accept_language_falls_through() {
        let h = headers(&[
            ("accept-language", "fr-FR,de;q=0.8"),
            ("x-user-locale", "es-ES"),
        ]);
        assert_eq!(extract_locale(&h, "en-US"), "es-ES");
    }

    #[test]
    fn test_user_locale_must_match_exactly() {
        let h = headers(&[("x-user-locale", "es")]);
        assert_eq!(extract_locale(&h, "en-US"), "en-US");
    }

    #[test]
    fn test_no_headers_yields_default() {
        assert_eq!(extract_locale(&HeaderMap::new(), "en-US"), "en-US");
    }
}
