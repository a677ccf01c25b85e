//! Base prompt composer over the static English template catalog.

use chrono::Locale;
use tracing::{error, warn};

use crate::locale::{interpolate, unresolved_placeholders};
use crate::models::{ComposedPrompt, ContentType, EphemerisSnapshot, UserProfile};

use super::catalog::select_template;
use super::variables::PromptVariables;
use super::vocabulary::Vocabulary;

/// Composes prompt pairs from the static catalog.
#[derive(Debug, Clone)]
pub struct PromptComposer {
    brand_name: String,
}

impl PromptComposer {
    pub fn new(brand_name: impl Into<String>) -> Self {
        Self {
            brand_name: brand_name.into(),
        }
    }

    pub fn brand_name(&self) -> &str {
        &self.brand_name
    }

    /// Compose a prompt pair for one content request.
    ///
    /// Returns `None` only when the catalog has no template for the
    /// perspective/content-type pair even after tier fallback - a
    /// configuration defect the caller must handle, not a runtime fault.
    pub fn compose(
        &self,
        user: &UserProfile,
        ephemeris: &EphemerisSnapshot,
        content_type: ContentType,
        news_context: Option<&str>,
    ) -> Option<ComposedPrompt> {
        let Some((template, _selection)) =
            select_template(user.perspective, content_type, user.tier)
        else {
            error!(
                perspective = user.perspective.as_str(),
                content_type = content_type.as_str(),
                tier = user.tier.as_str(),
                "no prompt template in catalog"
            );
            return None;
        };

        let date_text = ephemeris
            .date
            .format_localized("%A, %B %e, %Y", Locale::en_US)
            .to_string();

        let vars = PromptVariables::compute(
            user,
            ephemeris,
            date_text,
            &self.brand_name,
            news_context,
            &Vocabulary::english(),
        );

        let system_prompt = interpolate(&template.system_prompt, vars.as_map());
        let user_prompt = interpolate(&template.base_prompt, vars.as_map());

        warn_unresolved(&template.id, &system_prompt);
        warn_unresolved(&template.id, &user_prompt);

        Some(ComposedPrompt {
            system_prompt,
            user_prompt,
            template_id: template.id.clone(),
            model: template.model.clone(),
        })
    }
}

/// Log placeholders that survived substitution. Not fatal, but a
/// caller-visible signal of template/catalog drift.
pub(super) fn warn_unresolved(template_id: &str, text: &str) {
    let leftover = unresolved_placeholders(text);
    if !leftover.is_empty() {
        warn!(
            template = %template_id,
            placeholders = ?leftover,
            "unresolved placeholders after substitution"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FocusArea, Perspective, Tier};
    use chrono::NaiveDate;

    fn user(tier: Tier) -> UserProfile {
        UserProfile {
            name: "Mara".to_string(),
            tier,
            perspective: Perspective::Calm,
            focus_areas: vec![FocusArea::Wellness],
            birth_location: "Lisbon, Portugal".to_string(),
            timezone: "Europe/Lisbon".to_string(),
            rising_sign: Some("Libra".to_string()),
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
            retrogrades: vec!["Mercury".to_string()],
        }
    }

    #[test]
    fn test_compose_substitutes_every_placeholder() {
        let composer = PromptComposer::new("Luminary");
        let prompt = composer
            .compose(&user(Tier::Pro), &ephemeris(), ContentType::Daily, None)
            .unwrap();

        assert_eq!(prompt.template_id, "calm-daily-pro");
        assert!(unresolved_placeholders(&prompt.system_prompt).is_empty());
        assert!(unresolved_placeholders(&prompt.user_prompt).is_empty());
        assert!(prompt.system_prompt.contains("Luminary"));
        assert!(prompt.user_prompt.contains("Pisces"));
        assert!(prompt.user_prompt.contains("Libra rising"));
        assert!(prompt.user_prompt.contains("Mercury"));
    }

    #[test]
    fn test_compose_falls_back_to_free_template() {
        let composer = PromptComposer::new("Luminary");
        let prompt = composer
            .compose(&user(Tier::Basic), &ephemeris(), ContentType::Weekly, None)
            .unwrap();

        assert_eq!(prompt.template_id, "calm-weekly-free");
        assert!(prompt.user_prompt.contains("The week begins on"));
    }

    #[test]
    fn test_news_context_defaults_when_absent() {
        let composer = PromptComposer::new("Luminary");
        let with_news = composer
            .compose(
                &user(Tier::Pro),
                &ephemeris(),
                ContentType::Daily,
                Some("a notable eclipse this weekend"),
            )
            .unwrap();
        let without = composer
            .compose(&user(Tier::Pro), &ephemeris(), ContentType::Daily, None)
            .unwrap();

        assert!(with_news.user_prompt.contains("a notable eclipse this weekend"));
        assert!(without.user_prompt.contains("no notable current events"));
    }
}
