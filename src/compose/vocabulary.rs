//! Domain vocabulary translation.
//!
//! Ephemeris data arrives in English. When composing for another
//! locale, sign names, moon phases, aspect names and a curated keyword
//! set are translated through static lookup tables; anything not in a
//! table passes through unchanged.

use std::collections::HashMap;

use once_cell::sync::Lazy;

/// Fixed phrases used when a list variable is empty, per locale.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    locale: &'static str,
    pub gentle_aspects: &'static str,
    pub no_retrogrades: &'static str,
    pub default_news_context: &'static str,
    pub unknown: &'static str,
}

impl Vocabulary {
    /// Identity vocabulary for English composition.
    pub fn english() -> Self {
        Self {
            locale: "en",
            gentle_aspects: "gentle cosmic harmony",
            no_retrogrades: "no retrograde planets currently",
            default_news_context: "no notable current events",
            unknown: "Unknown",
        }
    }

    /// Vocabulary for a locale; unknown locales get the English tables.
    pub fn for_locale(locale: &str) -> Self {
        match locale.split('-').next() {
            Some("es") => Self {
                locale: "es",
                gentle_aspects: "suave armonía cósmica",
                no_retrogrades: "ningún planeta retrógrado actualmente",
                default_news_context: "sin actualidad destacable",
                unknown: "Desconocido",
            },
            _ => Self::english(),
        }
    }

    /// Translate one domain term, preserving it when no table has it.
    pub fn translate(&self, term: &str) -> String {
        if self.locale == "en" {
            return term.to_string();
        }

        let key = term.trim().to_lowercase();
        SPANISH_TERMS
            .get(key.as_str())
            .map(|t| t.to_string())
            .unwrap_or_else(|| term.to_string())
    }
}

/// Zodiac signs, moon phases, aspect names, planets and curated
/// perspective keywords, English (lowercase) to Spanish.
static SPANISH_TERMS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        // Zodiac signs
        ("aries", "Aries"),
        ("taurus", "Tauro"),
        ("gemini", "Géminis"),
        ("cancer", "Cáncer"),
        ("leo", "Leo"),
        ("virgo", "Virgo"),
        ("libra", "Libra"),
        ("scorpio", "Escorpio"),
        ("sagittarius", "Sagitario"),
        ("capricorn", "Capricornio"),
        ("aquarius", "Acuario"),
        ("pisces", "Piscis"),
        // Moon phases
        ("new moon", "luna nueva"),
        ("waxing crescent", "luna creciente"),
        ("first quarter", "cuarto creciente"),
        ("waxing gibbous", "gibosa creciente"),
        ("full moon", "luna llena"),
        ("waning gibbous", "gibosa menguante"),
        ("last quarter", "cuarto menguante"),
        ("waning crescent", "luna menguante"),
        // Aspects
        ("conjunction", "conjunción"),
        ("sextile", "sextil"),
        ("square", "cuadratura"),
        ("trine", "trígono"),
        ("opposition", "oposición"),
        // Planets
        ("sun", "Sol"),
        ("moon", "Luna"),
        ("mercury", "Mercurio"),
        ("venus", "Venus"),
        ("mars", "Marte"),
        ("jupiter", "Júpiter"),
        ("saturn", "Saturno"),
        ("uranus", "Urano"),
        ("neptune", "Neptuno"),
        ("pluto", "Plutón"),
        // Focus area display names
        ("love & relationships", "amor y relaciones"),
        ("career & purpose", "carrera y propósito"),
        ("wellness & balance", "bienestar y equilibrio"),
        ("personal growth", "crecimiento personal"),
        ("money & security", "dinero y seguridad"),
        // Curated perspective keywords
        ("breathe", "respira"),
        ("stillness", "quietud"),
        ("balance", "equilibrio"),
        ("gentleness", "dulzura"),
        ("ease", "calma"),
        ("insight", "perspicacia"),
        ("pattern", "patrón"),
        ("context", "contexto"),
        ("understanding", "comprensión"),
        ("clarity", "claridad"),
        ("momentum", "impulso"),
        ("opportunity", "oportunidad"),
        ("ambition", "ambición"),
        ("focus", "enfoque"),
        ("drive", "empuje"),
        ("precision", "precisión"),
        ("timing", "sincronización"),
        ("observation", "observación"),
        ("data", "datos"),
        ("detail", "detalle"),
    ])
});
