//! Localized prompt composer.
//!
//! Wraps the base composer: prompt fragments come from the locale
//! document's `prompts` section and domain vocabulary is translated, so
//! the generation request itself reads in the subscriber's language.
//! Any failure during localized composition falls back requested locale
//! -> English -> unlocalized base composer, so the pipeline always
//! returns something renderable (or the base composer's catalog-miss
//! `None`, which is a configuration defect either way).

use tracing::{error, warn};

use crate::locale::{LocaleDocument, LocaleService, Resolved, interpolate};
use crate::models::{ComposedPrompt, ContentType, EphemerisSnapshot, UserProfile};

use super::catalog::{PromptTemplate, select_template};
use super::composer::{PromptComposer, warn_unresolved};
use super::variables::PromptVariables;
use super::vocabulary::Vocabulary;

#[derive(Debug, Clone)]
pub struct LocalizedPromptComposer {
    locale: LocaleService,
    base: PromptComposer,
}

impl LocalizedPromptComposer {
    pub fn new(locale: LocaleService, base: PromptComposer) -> Self {
        Self { locale, base }
    }

    /// Compose a prompt pair in the requested locale.
    pub async fn compose(
        &self,
        user: &UserProfile,
        ephemeris: &EphemerisSnapshot,
        content_type: ContentType,
        news_context: Option<&str>,
        requested_locale: &str,
    ) -> Option<ComposedPrompt> {
        // The static catalog still decides whether this request is
        // servable at all, and supplies the model configuration.
        let Some((template, _)) = select_template(user.perspective, content_type, user.tier)
        else {
            error!(
                perspective = user.perspective.as_str(),
                content_type = content_type.as_str(),
                tier = user.tier.as_str(),
                "no prompt template in catalog"
            );
            return None;
        };

        let mut candidates = vec![requested_locale.to_string()];
        for fallback in [self.locale.default_locale(), "en-US"] {
            if !candidates.iter().any(|c| c == fallback) {
                candidates.push(fallback.to_string());
            }
        }

        let mut tried = Vec::new();
        for candidate in candidates {
            let doc = self.locale.load_locale(&candidate).await;
            if tried.contains(&doc.locale) {
                continue;
            }
            tried.push(doc.locale.clone());

            if let Some(prompt) = self.compose_from_document(template, user, ephemeris, news_context, &doc)
            {
                return Some(prompt);
            }
        }

        warn!(
            requested = %requested_locale,
            template = %template.id,
            "localized composition failed, using base composer"
        );
        self.base
            .compose(user, ephemeris, content_type, news_context)
    }

    fn compose_from_document(
        &self,
        template: &PromptTemplate,
        user: &UserProfile,
        ephemeris: &EphemerisSnapshot,
        news_context: Option<&str>,
        doc: &LocaleDocument,
    ) -> Option<ComposedPrompt> {
        let tier = user.tier.as_str();

        let system_frag = match doc.resolve(&format!("prompts.system.{tier}")) {
            Resolved::Found(text) => text,
            Resolved::Missing(path) => {
                warn!(locale = %doc.locale, path = %path, "prompt fragment missing from locale document");
                return None;
            }
        };
        let base_frag = match doc.resolve(&format!("prompts.base.{tier}")) {
            Resolved::Found(text) => text,
            Resolved::Missing(path) => {
                warn!(locale = %doc.locale, path = %path, "prompt fragment missing from locale document");
                return None;
            }
        };

        let vocab = Vocabulary::for_locale(&doc.locale);
        let date_text = self.locale.format_date(ephemeris.date, &doc.locale);
        let brand = match doc.resolve("common.brand") {
            Resolved::Found(brand) => brand,
            Resolved::Missing(_) => self.base.brand_name().to_string(),
        };

        let vars =
            PromptVariables::compute(user, ephemeris, date_text, &brand, news_context, &vocab);

        let user_prompt = interpolate(&base_frag, vars.as_map());
        let user_prompt =
            self.locale
                .apply_perspective_to_prompt(&user_prompt, user.perspective, &doc.locale);

        let mut system_prompt = interpolate(&system_frag, vars.as_map());
        if let Resolved::Found(fragment) =
            doc.resolve(&format!("prompts.perspectives.{}", user.perspective.as_str()))
        {
            system_prompt.push('\n');
            system_prompt.push_str(&fragment);
        }

        let template_id = format!("{}@{}", template.id, doc.locale);
        warn_unresolved(&template_id, &system_prompt);
        warn_unresolved(&template_id, &user_prompt);

        Some(ComposedPrompt {
            system_prompt,
            user_prompt,
            template_id,
            model: template.model.clone(),
        })
    }
}
