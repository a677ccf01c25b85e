//! HTTP handlers for the content API.
//!
//! Handlers negotiate the locale, delegate to the pipeline, and wrap
//! everything through the response builders. Request bodies are never
//! logged.

use std::collections::HashMap;
use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::error;

use crate::compose::LocalizedPromptComposer;
use crate::config::Config;
use crate::email::{EmailKind, render_email};
use crate::locale::{LocaleService, is_valid_locale};
use crate::models::{ContentType, EphemerisSnapshot, UserProfile};
use crate::store::{LocaleStore, catalog_key};

use super::negotiate::extract_locale;
use super::ratelimit::{RequestThrottle, client_key};
use super::responses::ApiResponses;

/// Shared application state for the router.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub locale: LocaleService,
    pub composer: LocalizedPromptComposer,
    pub responses: ApiResponses,
    pub store: Arc<dyn LocaleStore>,
    pub throttle: RequestThrottle,
}

impl AppState {
    /// Locale for this request: the subscriber's stored preference when
    /// valid, else header negotiation.
    fn request_locale(&self, user_locale: Option<&str>, headers: &HeaderMap) -> String {
        match user_locale {
            Some(locale) if is_valid_locale(locale) => locale.to_string(),
            _ => extract_locale(headers, &self.config.default_locale),
        }
    }
}

pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[derive(Debug, Deserialize)]
pub struct ComposeRequest {
    pub user: UserProfile,
    pub ephemeris: EphemerisSnapshot,
    pub content_type: ContentType,
    #[serde(default)]
    pub news_context: Option<String>,
}

/// POST /v1/prompts/compose
pub async fn compose(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ComposeRequest>,
) -> Response {
    let locale = state.request_locale(request.user.locale.as_deref(), &headers);

    if let Some(retry_after) = state.throttle.check(&client_key(&headers)) {
        return state.responses.rate_limit(retry_after, &locale).await;
    }

    if let Some(field_errors) = validate_user(&request.user) {
        return state.responses.validation_error(&field_errors, &locale).await;
    }

    let composed = state
        .composer
        .compose(
            &request.user,
            &request.ephemeris,
            request.content_type,
            request.news_context.as_deref(),
            &locale,
        )
        .await;

    match composed {
        Some(prompt) => match serde_json::to_value(&prompt) {
            Ok(data) => state.responses.success("composed", data, &locale, None).await,
            Err(_) => ApiResponses::internal_fallback(),
        },
        None => {
            error!(
                tier = request.user.tier.as_str(),
                perspective = request.user.perspective.as_str(),
                content_type = request.content_type.as_str(),
                "composition returned no prompt"
            );
            state.responses.error("internalError", &locale, None).await
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct EmailPreviewRequest {
    pub user: UserProfile,
    pub kind: EmailKind,
    pub content_type: ContentType,
}

/// POST /v1/emails/preview
pub async fn email_preview(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<EmailPreviewRequest>,
) -> Response {
    let locale = state.request_locale(request.user.locale.as_deref(), &headers);

    if let Some(field_errors) = validate_user(&request.user) {
        return state.responses.validation_error(&field_errors, &locale).await;
    }

    let doc = state.locale.load_locale(&locale).await;
    let email = render_email(
        &state.locale,
        &doc,
        request.kind,
        &request.user,
        request.content_type,
        &state.config.public_url,
    );

    match serde_json::to_value(&email) {
        Ok(data) => {
            state
                .responses
                .success("emailPreviewed", data, &locale, None)
                .await
        }
        Err(_) => ApiResponses::internal_fallback(),
    }
}

/// GET /v1/admin/locales
pub async fn list_locales(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let locale = state.request_locale(None, &headers);

    match state.store.list_entries().await {
        Ok(entries) => match serde_json::to_value(&entries) {
            Ok(data) => {
                state
                    .responses
                    .success("localesListed", data, &locale, None)
                    .await
            }
            Err(_) => ApiResponses::internal_fallback(),
        },
        Err(e) => {
            error!(error = %e, "failed to list locale catalogs");
            state.responses.error("internalError", &locale, None).await
        }
    }
}

/// PUT /v1/admin/locales/:locale
pub async fn upload_catalog(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(catalog_locale): Path<String>,
    Json(document): Json<Value>,
) -> Response {
    let locale = state.request_locale(None, &headers);

    if !is_valid_locale(&catalog_locale) {
        return state.responses.error("invalidInput", &locale, None).await;
    }

    let key = catalog_key(&catalog_locale, &state.config.brand);
    match state.store.put_document(&key, document).await {
        Ok(entry) => {
            // Serve the new catalog immediately instead of waiting out
            // the cache TTL.
            state.locale.clear_cache();

            let vars = HashMap::from([("key", entry.key.clone())]);
            match serde_json::to_value(&entry) {
                Ok(data) => {
                    state
                        .responses
                        .success("catalogStored", data, &locale, Some(&vars))
                        .await
                }
                Err(_) => ApiResponses::internal_fallback(),
            }
        }
        Err(e) => {
            error!(key = %key, error = %e, "failed to store locale catalog");
            state.responses.error("internalError", &locale, None).await
        }
    }
}

/// POST /v1/admin/cache/clear
pub async fn clear_cache(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let locale = state.request_locale(None, &headers);
    state.locale.clear_cache();
    state
        .responses
        .success("cacheCleared", Value::Null, &locale, None)
        .await
}

/// Localized 404 for unknown routes.
pub async fn not_found(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let locale = state.request_locale(None, &headers);
    state.responses.error("notFound", &locale, None).await
}

/// Minimal request validation for the content endpoints.
///
/// Returns `None` when the profile is usable, else the per-field error
/// keys for the validation response builder.
fn validate_user(user: &UserProfile) -> Option<Vec<(String, Vec<String>)>> {
    let mut field_errors = Vec::new();

    if user.name.trim().is_empty() {
        field_errors.push(("name".to_string(), vec!["required".to_string()]));
    }
    if user.timezone.trim().is_empty() {
        field_errors.push(("timezone".to_string(), vec!["required".to_string()]));
    }

    if field_errors.is_empty() {
        None
    } else {
        Some(field_errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheRegistry;
    use crate::compose::PromptComposer;
    use crate::models::{FocusArea, Perspective, Tier};
    use crate::store::MemoryLocaleStore;
    use axum::http::StatusCode;
    use chrono::NaiveDate;
    use url::Url;

    fn state(throttle: RequestThrottle) -> AppState {
        let config = Config {
            default_locale: "en-US".to_string(),
            brand: "luminary".to_string(),
            listen_port: 0,
            public_url: Url::parse("https://luminary.example/").unwrap(),
            mongodb_uri: None,
            mongodb_database: "luminary".to_string(),
        };

        let store: Arc<dyn LocaleStore> = Arc::new(MemoryLocaleStore::with_embedded("luminary"));
        let registry = CacheRegistry::new();
        let service = LocaleService::new(Arc::clone(&store), &registry, "en-US", "luminary");

        AppState {
            config: Arc::new(config),
            locale: service.clone(),
            composer: LocalizedPromptComposer::new(
                service.clone(),
                PromptComposer::new("Luminary"),
            ),
            responses: ApiResponses::new(service),
            store,
            throttle,
        }
    }

    fn compose_request() -> ComposeRequest {
        ComposeRequest {
            user: user("Mara", "Europe/Lisbon"),
            ephemeris: EphemerisSnapshot {
                date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                sun_sign: "Pisces".to_string(),
                sun_degree: 10.4,
                moon_sign: "Gemini".to_string(),
                moon_degree: 3.0,
                moon_phase: "waxing crescent".to_string(),
                aspects: vec![],
                retrogrades: vec![],
            },
            content_type: ContentType::Daily,
            news_context: None,
        }
    }

    fn user(name: &str, timezone: &str) -> UserProfile {
        UserProfile {
            name: name.to_string(),
            tier: Tier::Free,
            perspective: Perspective::Calm,
            focus_areas: vec![FocusArea::Love],
            birth_location: "Lisbon, Portugal".to_string(),
            timezone: timezone.to_string(),
            rising_sign: None,
            locale: None,
        }
    }

    #[test]
    fn test_validate_user_accepts_complete_profile() {
        assert!(validate_user(&user("Mara", "Europe/Lisbon")).is_none());
    }

    #[test]
    fn test_validate_user_collects_all_missing_fields() {
        let errors = validate_user(&user(" ", "")).unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].0, "name");
        assert_eq!(errors[1].0, "timezone");
    }

    #[tokio::test]
    async fn test_compose_endpoint_succeeds() {
        let state = state(RequestThrottle::per_minute(30));
        let response = compose(State(state), HeaderMap::new(), Json(compose_request())).await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_compose_endpoint_rejects_incomplete_profile() {
        let state = state(RequestThrottle::per_minute(30));
        let mut request = compose_request();
        request.user.name = String::new();

        let response = compose(State(state), HeaderMap::new(), Json(request)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_compose_endpoint_throttles() {
        let state = state(RequestThrottle::per_minute(1));

        let first = compose(
            State(state.clone()),
            HeaderMap::new(),
            Json(compose_request()),
        )
        .await;
        assert_eq!(first.status(), StatusCode::OK);

        let second = compose(State(state), HeaderMap::new(), Json(compose_request())).await;
        assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(second.headers().get("retry-after").is_some());
    }

    #[tokio::test]
    async fn test_email_preview_endpoint_renders_localized() {
        let state = state(RequestThrottle::per_minute(30));
        let mut profile = user("Mara", "Europe/Lisbon");
        profile.locale = Some("es-ES".to_string());

        let request = EmailPreviewRequest {
            user: profile,
            kind: EmailKind::Welcome,
            content_type: ContentType::Daily,
        };

        let response = email_preview(State(state), HeaderMap::new(), Json(request)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-language").unwrap(),
            "es-ES"
        );
    }

    #[tokio::test]
    async fn test_upload_then_list_catalogs() {
        let state = state(RequestThrottle::per_minute(30));

        let response = upload_catalog(
            State(state.clone()),
            HeaderMap::new(),
            Path("es-ES".to_string()),
            Json(serde_json::json!({ "common": { "brand": "Luminary" } })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = list_locales(State(state), HeaderMap::new()).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_upload_rejects_unsupported_locale() {
        let state = state(RequestThrottle::per_minute(30));

        let response = upload_catalog(
            State(state),
            HeaderMap::new(),
            Path("fr-FR".to_string()),
            Json(serde_json::json!({})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
