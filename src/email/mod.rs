//! Outbound email copy rendering.
//!
//! Renders the localized framing of an email (subject, heading, intro,
//! footer, unsubscribe line) from the locale document's `email`
//! section. The generated horoscope body is produced elsewhere; this
//! module only owns the copy around it. Missing keys degrade to
//! bracketed placeholders like every other lookup.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::locale::{LocaleDocument, LocaleService, Resolved};
use crate::models::{ContentType, UserProfile};

/// Which email is being rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailKind {
    Welcome,
    Digest,
}

impl EmailKind {
    fn section(&self) -> &'static str {
        match self {
            Self::Welcome => "email.welcome",
            Self::Digest => "email.digest",
        }
    }
}

/// Localized email framing, ready for the delivery layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedEmail {
    pub locale: String,
    pub subject: String,
    pub heading: String,
    pub intro: String,
    pub footer: String,
    pub unsubscribe: String,
}

/// Render one email's copy for a subscriber.
pub fn render_email(
    service: &LocaleService,
    doc: &LocaleDocument,
    kind: EmailKind,
    user: &UserProfile,
    content_type: ContentType,
    public_url: &Url,
) -> RenderedEmail {
    let brand = service.token(doc, "common.brand", None);
    let date_text = service.format_date(chrono::Utc::now().date_naive(), &doc.locale);

    let unsubscribe_url = public_url
        .join("unsubscribe")
        .map(|u| u.to_string())
        .unwrap_or_else(|_| public_url.to_string());

    let content_type_name = match doc.resolve(&format!("formats.{}", content_type.as_str())) {
        Resolved::Found(name) => name,
        Resolved::Missing(_) => content_type.as_str().to_string(),
    };

    let vars = HashMap::from([
        ("name", user.name.clone()),
        ("brand", brand),
        ("date", date_text),
        ("content_type", content_type_name),
        ("unsubscribe_url", unsubscribe_url),
    ]);

    let section = kind.section();
    RenderedEmail {
        locale: doc.locale.clone(),
        subject: service.token(doc, &format!("{section}.subject"), Some(&vars)),
        heading: service.token(doc, &format!("{section}.heading"), Some(&vars)),
        intro: service.token(doc, &format!("{section}.intro"), Some(&vars)),
        footer: service.token(doc, &format!("{section}.footer"), Some(&vars)),
        unsubscribe: service.token(doc, &format!("{section}.unsubscribe"), Some(&vars)),
    }
}
