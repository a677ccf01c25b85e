//! Perspective profiles.
//!
//! A perspective is a tone/content bias applied to generated text. The
//! profile set is closed and compiled into the binary; locale documents
//! only translate the display names.

use crate::models::Perspective;

/// Static metadata for one perspective.
#[derive(Debug, Clone)]
pub struct PerspectiveProfile {
    pub perspective: Perspective,
    pub tone: &'static str,
    pub focus: &'static str,
    pub style: &'static str,
    pub keywords: &'static [&'static str],
    /// How strongly the perspective should bias the text, in [0, 1].
    pub influence: f64,
}

const PROFILES: [PerspectiveProfile; 4] = [
    PerspectiveProfile {
        perspective: Perspective::Calm,
        tone: "soothing and grounded",
        focus: "emotional balance, rest and what can wait",
        style: "soft, reassuring sentences with room to breathe",
        keywords: &["breathe", "stillness", "balance", "gentleness", "ease"],
        influence: 0.6,
    },
    PerspectiveProfile {
        perspective: Perspective::Knowledge,
        tone: "curious and explanatory",
        focus: "what the transits mean and why they matter",
        style: "clear explanations that teach as they guide",
        keywords: &["insight", "pattern", "context", "understanding", "clarity"],
        influence: 0.8,
    },
    PerspectiveProfile {
        perspective: Perspective::Success,
        tone: "energetic and encouraging",
        focus: "momentum, goals and windows of opportunity",
        style: "direct, action-oriented advice with a concrete next step",
        keywords: &["momentum", "opportunity", "ambition", "focus", "drive"],
        influence: 0.7,
    },
    PerspectiveProfile {
        perspective: Perspective::Evidence,
        tone: "measured and precise",
        focus: "observable transits and concrete timing",
        style: "specific, matter-of-fact statements without embellishment",
        keywords: &["precision", "timing", "observation", "data", "detail"],
        influence: 0.9,
    },
];

/// Look up the profile for a perspective.
pub fn profile(perspective: Perspective) -> &'static PerspectiveProfile {
    PROFILES
        .iter()
        .find(|p| p.perspective == perspective)
        .unwrap_or(&PROFILES[0])
}

/// One-line cultural-context hints keyed by primary language subtag.
const CULTURAL_HINTS: [(&str, &str); 2] = [
    (
        "en",
        "Write for a general English-speaking readership; keep idioms light and universal.",
    ),
    (
        "es",
        "Escribe para lectores de España; usa un tono cercano y tutea al lector.",
    ),
];

/// Resolve the cultural hint for a locale, defaulting to the "en" hint.
pub fn cultural_hint(locale: &str) -> &'static str {
    let language = locale.split('-').next().unwrap_or(locale);
    CULTURAL_HINTS
        .iter()
        .find(|(lang, _)| *lang == language)
        .or_else(|| CULTURAL_HINTS.iter().find(|(lang, _)| *lang == "en"))
        .map(|(_, hint)| *hint)
        .unwrap_or("")
}

/// Append the perspective's instructional block to a base prompt.
///
/// The block states the influence split as percentages and carries the
/// profile's tone/focus/style/keyword guidance plus the locale's
/// cultural hint.
pub fn apply_perspective_to_prompt(
    base_prompt: &str,
    perspective: Perspective,
    locale: &str,
) -> String {
    let profile = profile(perspective);
    let influence_pct = (profile.influence * 100.0).round() as u32;

    format!(
        "{base}\n\n\
         Perspective guidance ({name}): apply this perspective with {pct}% influence, \
         general guidance the remaining {rest}%.\n\
         Tone: {tone}.\n\
         Focus: {focus}.\n\
         Style: {style}.\n\
         Favor vocabulary such as: {keywords}.\n\
         Cultural context: {hint}",
        base = base_prompt,
        name = perspective.as_str(),
        pct = influence_pct,
        rest = 100 - influence_pct,
        tone = profile.tone,
        focus = profile.focus,
        style = profile.style,
        keywords = profile.keywords.join(", "),
        hint = cultural_hint(locale),
    )
}
