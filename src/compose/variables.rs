//! Prompt variable computation.
//!
//! The variable set is fixed: templates may use any subset, and the
//! composer warns about placeholders that survive substitution.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::models::{Aspect, EphemerisSnapshot, FocusArea, UserProfile};

use super::vocabulary::Vocabulary;

/// At most this many aspects are rendered into a prompt.
const MAX_ASPECTS: usize = 3;

/// At most this many focus keywords are rendered into a prompt.
const MAX_FOCUS_KEYWORDS: usize = 6;

/// Thematic keywords per focus area, flattened across the subscriber's
/// chosen areas when building the `focus_keywords` variable.
static FOCUS_KEYWORDS: Lazy<HashMap<FocusArea, &'static [&'static str]>> = Lazy::new(|| {
    HashMap::from([
        (
            FocusArea::Love,
            &["connection", "tenderness", "honesty", "closeness", "repair"][..],
        ),
        (
            FocusArea::Career,
            &["craft", "recognition", "ambition", "collaboration", "direction"][..],
        ),
        (
            FocusArea::Wellness,
            &["rest", "balance", "breath", "nourishment", "rhythm"][..],
        ),
        (
            FocusArea::Growth,
            &["curiosity", "courage", "habit", "reflection", "patience"][..],
        ),
        (
            FocusArea::Finance,
            &["security", "planning", "restraint", "opportunity", "groundwork"][..],
        ),
    ])
});

/// English display names for focus areas (the static catalog's voice;
/// localized composition reads display names from the locale document).
fn focus_display(area: FocusArea) -> &'static str {
    match area {
        FocusArea::Love => "love & relationships",
        FocusArea::Career => "career & purpose",
        FocusArea::Wellness => "wellness & balance",
        FocusArea::Growth => "personal growth",
        FocusArea::Finance => "money & security",
    }
}

/// The computed variable map for one composition request.
#[derive(Debug, Clone)]
pub struct PromptVariables {
    values: HashMap<&'static str, String>,
}

impl PromptVariables {
    /// Compute the fixed variable set from a subscriber, a sky snapshot
    /// and the already-formatted date text.
    pub fn compute(
        user: &UserProfile,
        ephemeris: &EphemerisSnapshot,
        date_text: String,
        brand_name: &str,
        news_context: Option<&str>,
        vocab: &Vocabulary,
    ) -> Self {
        let primary = user.focus_areas.first().copied().unwrap_or(FocusArea::Growth);
        let secondary = user
            .focus_areas
            .get(1)
            .copied()
            .unwrap_or(FocusArea::Wellness);

        let mut values = HashMap::new();
        values.insert("date", date_text);
        values.insert("name", user.name.clone());
        values.insert("brand", brand_name.to_string());
        values.insert("sun_sign", vocab.translate(&ephemeris.sun_sign));
        values.insert("sun_degree", format!("{:.1}", ephemeris.sun_degree));
        values.insert("moon_sign", vocab.translate(&ephemeris.moon_sign));
        values.insert("moon_degree", format!("{:.1}", ephemeris.moon_degree));
        values.insert("moon_phase", vocab.translate(&ephemeris.moon_phase));
        values.insert("primary_focus", vocab.translate(focus_display(primary)));
        values.insert("secondary_focus", vocab.translate(focus_display(secondary)));
        values.insert("aspects", format_aspects(&ephemeris.aspects, vocab));
        values.insert(
            "retrogrades",
            format_retrogrades(&ephemeris.retrogrades, vocab),
        );
        values.insert("birth_location", user.birth_location.clone());
        values.insert("timezone", user.timezone.clone());
        values.insert("focus_keywords", focus_keywords(&user.focus_areas, vocab));
        values.insert(
            "news_context",
            news_context
                .map(str::to_string)
                .unwrap_or_else(|| vocab.default_news_context.to_string()),
        );
        values.insert(
            "rising_sign",
            user.rising_sign
                .as_deref()
                .map(|s| vocab.translate(s))
                .unwrap_or_else(|| vocab.unknown.to_string()),
        );

        Self { values }
    }

    pub fn as_map(&self) -> &HashMap<&'static str, String> {
        &self.values
    }
}

/// Render at most the top [`MAX_ASPECTS`] aspects as
/// `"{planet1}-{planet2} {name}"`, comma-joined. An empty list renders
/// the fixed gentle-harmony phrase.
fn format_aspects(aspects: &[Aspect], vocab: &Vocabulary) -> String {
    if aspects.is_empty() {
        return vocab.gentle_aspects.to_string();
    }

    aspects
        .iter()
        .take(MAX_ASPECTS)
        .map(|a| {
            format!(
                "{}-{} {}",
                vocab.translate(&a.planet1),
                vocab.translate(&a.planet2),
                vocab.translate(&a.name)
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Comma-join retrograde planets, or the fixed none phrase.
fn format_retrogrades(retrogrades: &[String], vocab: &Vocabulary) -> String {
    if retrogrades.is_empty() {
        return vocab.no_retrogrades.to_string();
    }

    retrogrades
        .iter()
        .map(|p| vocab.translate(p))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Flatten keywords across the subscriber's focus areas, in preference
/// order, and keep the first [`MAX_FOCUS_KEYWORDS`].
fn focus_keywords(areas: &[FocusArea], vocab: &Vocabulary) -> String {
    let areas: &[FocusArea] = if areas.is_empty() {
        &[FocusArea::Growth, FocusArea::Wellness]
    } else {
        areas
    };

    areas
        .iter()
        .filter_map(|area| FOCUS_KEYWORDS.get(area))
        .flat_map(|keywords| keywords.iter())
        .take(MAX_FOCUS_KEYWORDS)
        .map(|k| vocab.translate(k))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Perspective, Tier};
    use chrono::NaiveDate;

    fn aspect(p1: &str, p2: &str, name: &str) -> Aspect {
        Aspect {
            planet1: p1.to_string(),
            planet2: p2.to_string(),
            name: name.to_string(),
            orb: 2.0,
        }
    }

    fn user() -> UserProfile {
        UserProfile {
            name: "Mara".to_string(),
            tier: Tier::Pro,
            perspective: Perspective::Success,
            focus_areas: vec![FocusArea::Career, FocusArea::Love],
            birth_location: "Lisbon, Portugal".to_string(),
            timezone: "Europe/Lisbon".to_string(),
            rising_sign: None,
            locale: None,
        }
    }

    fn ephemeris() -> EphemerisSnapshot {
        EphemerisSnapshot {
            date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            sun_sign: "Pisces".to_string(),
            sun_degree: 10.4,
            moon_sign: "Gemini".to_string(),
            moon_degree: 3.0,
            moon_phase: "waxing crescent".to_string(),
            aspects: vec![],
            retrogrades: vec![],
        }
    }

    #[test]
    fn test_empty_aspects_render_fixed_phrase() {
        assert_eq!(
            format_aspects(&[], &Vocabulary::english()),
            "gentle cosmic harmony"
        );
    }

    #[test]
    fn test_aspects_cap_at_three() {
        let aspects = vec![
            aspect("Sun", "Moon", "trine"),
            aspect("Venus", "Mars", "square"),
            aspect("Mercury", "Jupiter", "sextile"),
            aspect("Saturn", "Neptune", "opposition"),
            aspect("Sun", "Pluto", "conjunction"),
        ];

        assert_eq!(
            format_aspects(&aspects, &Vocabulary::english()),
            "Sun-Moon trine, Venus-Mars square, Mercury-Jupiter sextile"
        );
    }

    #[test]
    fn test_empty_retrogrades_render_fixed_phrase() {
        assert_eq!(
            format_retrogrades(&[], &Vocabulary::english()),
            "no retrograde planets currently"
        );
    }

    #[test]
    fn test_focus_keywords_flatten_and_cap_at_six() {
        let keywords = focus_keywords(
            &[FocusArea::Career, FocusArea::Love],
            &Vocabulary::english(),
        );
        let parts: Vec<&str> = keywords.split(", ").collect();

        assert_eq!(parts.len(), 6);
        // All five career keywords, then the first love keyword
        assert_eq!(parts[0], "craft");
        assert_eq!(parts[5], "connection");
    }

    #[test]
    fn test_variable_set_is_complete() {
        let vars = PromptVariables::compute(
            &user(),
            &ephemeris(),
            "Saturday, March 1, 2025".to_string(),
            "Luminary",
            None,
            &Vocabulary::english(),
        );
        let map = vars.as_map();

        for key in [
            "date",
            "name",
            "brand",
            "sun_sign",
            "sun_degree",
            "moon_sign",
            "moon_degree",
            "moon_phase",
            "primary_focus",
            "secondary_focus",
            "aspects",
            "retrogrades",
            "birth_location",
            "timezone",
            "focus_keywords",
            "news_context",
            "rising_sign",
        ] {
            assert!(map.contains_key(key), "variable {key} missing");
        }

        assert_eq!(map["rising_sign"], "Unknown");
        assert_eq!(map["news_context"], "no notable current events");
        assert_eq!(map["sun_degree"], "10.4");
    }

    #[test]
    fn test_spanish_variables_translate_vocabulary() {
        let vars = PromptVariables::compute(
            &user(),
            &ephemeris(),
            "sábado, 1 de marzo de 2025".to_string(),
            "Luminary",
            None,
            &Vocabulary::for_locale("es-ES"),
        );
        let map = vars.as_map();

        assert_eq!(map["sun_sign"], "Piscis");
        assert_eq!(map["moon_sign"], "Géminis");
        assert_eq!(map["moon_phase"], "luna creciente");
        assert_eq!(map["retrogrades"], "ningún planeta retrógrado actualmente");
        assert_eq!(map["rising_sign"], "Desconocido");
    }
}
