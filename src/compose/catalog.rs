//! Static prompt template catalog.
//!
//! Templates are keyed `{perspective}-{content_type}-{tier}` and
//! versioned with the code. Every perspective/content-type pair ships a
//! `free` template; richer tiers add entries where the product pays for
//! them (currently `pro` dailies). Selection falls back to the `free`
//! tier; a double miss is a catalog defect, not a runtime fault.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::models::{ContentType, FocusArea, ModelConfig, Perspective, Tier};

/// One catalog entry.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    pub id: String,
    pub system_prompt: String,
    /// Template text with `{{variable}}` placeholders.
    pub base_prompt: String,
    /// Relative emphasis per focus area, used to bias generation.
    pub focus_weights: HashMap<FocusArea, f64>,
    pub model: ModelConfig,
}

/// Outcome of template selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSelection {
    Exact,
    /// The requested tier had no entry; the `free` template was used.
    FreeTierFallback,
}

/// Build the catalog identifier for a (perspective, content type, tier).
pub fn template_id(perspective: Perspective, content_type: ContentType, tier: Tier) -> String {
    format!(
        "{}-{}-{}",
        perspective.as_str(),
        content_type.as_str(),
        tier.as_str()
    )
}

/// Select a template, falling back to the `free` tier.
///
/// Returns `None` only when the perspective/content-type pair has no
/// entry at all; callers treat that as a configuration error.
pub fn select_template(
    perspective: Perspective,
    content_type: ContentType,
    tier: Tier,
) -> Option<(&'static PromptTemplate, TemplateSelection)> {
    let exact = template_id(perspective, content_type, tier);
    if let Some(template) = CATALOG.get(&exact) {
        return Some((template, TemplateSelection::Exact));
    }

    let fallback = template_id(perspective, content_type, Tier::Free);
    if let Some(template) = CATALOG.get(&fallback) {
        debug!(requested = %exact, served = %fallback, "prompt template fell back to free tier");
        return Some((template, TemplateSelection::FreeTierFallback));
    }

    None
}

static CATALOG: Lazy<HashMap<String, PromptTemplate>> = Lazy::new(build_catalog);

fn build_catalog() -> HashMap<String, PromptTemplate> {
    let mut catalog = HashMap::new();

    for perspective in Perspective::ALL {
        for content_type in [ContentType::Daily, ContentType::Weekly, ContentType::Monthly] {
            insert(&mut catalog, perspective, content_type, Tier::Free);
        }
        // Pro subscribers get a dedicated daily template; other pro
        // content still reads well from the free one.
        insert(&mut catalog, perspective, ContentType::Daily, Tier::Pro);
    }

    catalog
}

fn insert(
    catalog: &mut HashMap<String, PromptTemplate>,
    perspective: Perspective,
    content_type: ContentType,
    tier: Tier,
) {
    let id = template_id(perspective, content_type, tier);
    catalog.insert(
        id.clone(),
        PromptTemplate {
            id,
            system_prompt: system_prompt(perspective, tier),
            base_prompt: base_prompt(content_type, tier),
            focus_weights: focus_weights(perspective),
            model: model_config(tier),
        },
    );
}

fn system_prompt(perspective: Perspective, tier: Tier) -> String {
    let depth = match tier {
        Tier::Pro => "an in-depth, personal",
        Tier::Basic => "a personal",
        Tier::Free | Tier::Trial => "a concise, warm",
    };

    let angle = match perspective {
        Perspective::Calm => "Lead with reassurance; the reader comes here to exhale.",
        Perspective::Knowledge => {
            "Explain what the transits mean; the reader wants to understand, not just be told."
        }
        Perspective::Success => {
            "Frame the sky as opportunity; the reader wants momentum and a next step."
        }
        Perspective::Evidence => {
            "Stay concrete and specific; name the transits and their timing plainly."
        }
    };

    format!(
        "You are the voice of {{{{brand}}}}, an astrology newsletter. \
         Write {depth} horoscope grounded in the provided sky data. {angle}"
    )
}

fn base_prompt(content_type: ContentType, tier: Tier) -> String {
    let opening = match content_type {
        ContentType::Daily => "Today is {{date}}.",
        ContentType::Weekly => "The week begins on {{date}}.",
        ContentType::Monthly => "The month begins on {{date}}.",
    };

    let sky = "The sun is in {{sun_sign}} at {{sun_degree}} degrees and the moon is \
               {{moon_phase}} in {{moon_sign}} at {{moon_degree}} degrees. \
               Major aspects: {{aspects}}. Retrogrades: {{retrogrades}}.";

    match tier {
        Tier::Pro => format!(
            "{opening} {sky} {{{{name}}}} was born in {{{{birth_location}}}} \
             ({{{{timezone}}}}) with {{{{rising_sign}}}} rising. Focus on \
             {{{{primary_focus}}}}, then {{{{secondary_focus}}}}. Themes to draw \
             from: {{{{focus_keywords}}}}. Current events context: {{{{news_context}}}}."
        ),
        _ => format!(
            "{opening} {sky} Write a reading for {{{{name}}}} focused on \
             {{{{primary_focus}}}}, touching on {{{{secondary_focus}}}}. \
             Themes to draw from: {{{{focus_keywords}}}}."
        ),
    }
}

fn focus_weights(perspective: Perspective) -> HashMap<FocusArea, f64> {
    // Uniform baseline, nudged toward the areas each perspective's
    // readers tend to pick.
    let mut weights = HashMap::from([
        (FocusArea::Love, 0.2),
        (FocusArea::Career, 0.2),
        (FocusArea::Wellness, 0.2),
        (FocusArea::Growth, 0.2),
        (FocusArea::Finance, 0.2),
    ]);

    let (boosted, drained) = match perspective {
        Perspective::Calm => (FocusArea::Wellness, FocusArea::Finance),
        Perspective::Knowledge => (FocusArea::Growth, FocusArea::Love),
        Perspective::Success => (FocusArea::Career, FocusArea::Wellness),
        Perspective::Evidence => (FocusArea::Finance, FocusArea::Love),
    };

    if let Some(weight) = weights.get_mut(&boosted) {
        *weight += 0.1;
    }
    if let Some(weight) = weights.get_mut(&drained) {
        *weight -= 0.1;
    }
    weights
}

fn model_config(tier: Tier) -> ModelConfig {
    match tier {
        Tier::Pro => ModelConfig {
            model: "gpt-4o".to_string(),
            temperature: 0.7,
            max_tokens: 1400,
        },
        Tier::Basic => ModelConfig {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.8,
            max_tokens: 900,
        },
        Tier::Free | Tier::Trial => ModelConfig {
            model: "gpt-4o-mini".to_string(),
            temperature: 0.8,
            max_tokens: 600,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_template_wins_over_fallback() {
        let (template, selection) =
            select_template(Perspective::Calm, ContentType::Daily, Tier::Pro).unwrap();

        assert_eq!(template.id, "calm-daily-pro");
        assert_eq!(selection, TemplateSelection::Exact);
    }

    #[test]
    fn test_missing_tier_falls_back_to_free() {
        // No basic-tier weekly template exists
        let (template, selection) =
            select_template(Perspective::Success, ContentType::Weekly, Tier::Basic).unwrap();

        assert_eq!(template.id, "success-weekly-free");
        assert_eq!(selection, TemplateSelection::FreeTierFallback);
    }

    #[test]
    fn test_every_perspective_has_free_coverage() {
        for perspective in Perspective::ALL {
            for content_type in [ContentType::Daily, ContentType::Weekly, ContentType::Monthly] {
                for tier in [Tier::Trial, Tier::Free, Tier::Basic, Tier::Pro] {
                    assert!(
                        select_template(perspective, content_type, tier).is_some(),
                        "no template for {perspective:?}/{content_type:?}/{tier:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_focus_weights_stay_normalized() {
        for perspective in Perspective::ALL {
            let weights = focus_weights(perspective);
            let total: f64 = weights.values().sum();
            assert!((total - 1.0).abs() < 1e-9);
            assert!(weights.values().all(|w| *w >= 0.0));
        }
    }
}
