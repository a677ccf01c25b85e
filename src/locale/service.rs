//! Locale service - cached catalog loading over the fallback chain.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Locale, NaiveDate};
use tracing::{debug, warn};

use crate::cache::{CacheConfig, CacheRegistry, TypedCache};
use crate::models::Perspective;
use crate::store::{LocaleStore, catalog_key};

use super::document::{DocumentSource, LocaleDocument};
use super::fallback::{ChainLink, fallback_chain, minimal_document};
use super::perspective;

/// Resolves locales to catalogs and owns the document cache.
///
/// Cloning shares the store handle and the cache. All public operations
/// are infallible by design; failures degrade along the fallback chain
/// and are logged with enough context for offline diagnosis.
#[derive(Clone)]
pub struct LocaleService {
    store: Arc<dyn LocaleStore>,
    cache: TypedCache<String, LocaleDocument>,
    default_locale: String,
    brand: String,
}

impl LocaleService {
    pub fn new(
        store: Arc<dyn LocaleStore>,
        registry: &CacheRegistry,
        default_locale: impl Into<String>,
        brand: impl Into<String>,
    ) -> Self {
        let cache = registry.get_or_create("locale_documents", CacheConfig::locale_documents());

        Self {
            store,
            cache,
            default_locale: default_locale.into(),
            brand: brand.into(),
        }
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    /// Resolve a locale to a catalog.
    ///
    /// Walks the fallback chain `[requested, default, minimal]`. A
    /// document that is simply not stored moves to the next link; a
    /// store failure (backend unreachable, malformed data) goes straight
    /// to the minimal catalog rather than hammering the backend again.
    pub async fn load_locale(&self, requested: &str) -> LocaleDocument {
        for link in fallback_chain(requested, &self.default_locale) {
            let (locale, source) = match link {
                ChainLink::Store { locale, source } => (locale, source),
                ChainLink::Minimal => break,
            };

            let cache_key = format!("{}:{}", locale, self.brand);
            if let Some(mut doc) = self.cache.get(&cache_key) {
                doc.source = source;
                if source == DocumentSource::DefaultLocale {
                    debug!(requested = %requested, served = %locale, "serving cached default-locale catalog");
                }
                return doc;
            }

            match self.store.get_document(&catalog_key(&locale, &self.brand)).await {
                Ok(Some(value)) => {
                    let doc = LocaleDocument::from_value(&locale, source, value);
                    self.cache.insert(cache_key, doc.clone());
                    if source == DocumentSource::DefaultLocale {
                        warn!(requested = %requested, served = %locale, "locale not stored, fell back to default");
                    }
                    return doc;
                }
                Ok(None) => {
                    warn!(locale = %locale, brand = %self.brand, "locale document not stored");
                }
                Err(e) => {
                    warn!(locale = %locale, error = %e, "locale store failed, serving minimal catalog");
                    break;
                }
            }
        }

        warn!(requested = %requested, "serving minimal fallback catalog");
        minimal_document(&self.default_locale)
    }

    /// Token lookup with interpolation. See [`LocaleDocument::token`].
    pub fn token(
        &self,
        doc: &LocaleDocument,
        path: &str,
        variables: Option<&HashMap<&str, String>>,
    ) -> String {
        doc.token(path, variables)
    }

    /// Append the perspective's weighted instructional block to a prompt.
    pub fn apply_perspective_to_prompt(
        &self,
        base_prompt: &str,
        perspective: Perspective,
        locale: &str,
    ) -> String {
        perspective::apply_perspective_to_prompt(base_prompt, perspective, locale)
    }

    /// Locale-aware long date formatting.
    ///
    /// Unknown locales fall back to the date's default representation
    /// rather than failing.
    pub fn format_date(&self, date: NaiveDate, locale: &str) -> String {
        match locale.split('-').next() {
            Some("en") => date
                .format_localized("%A, %B %e, %Y", Locale::en_US)
                .to_string(),
            Some("es") => date
                .format_localized("%A, %e de %B de %Y", Locale::es_ES)
                .to_string(),
            _ => date.to_string(),
        }
    }

    /// Empty the document cache. Used by tests and the admin API after
    /// a catalog upload.
    pub fn clear_cache(&self) {
        self.cache.invalidate_all();
        debug!("locale document cache cleared");
    }

    #[cfg(test)]
    pub(crate) fn cached_documents(&self) -> u64 {
        self.cache.entry_count()
    }
}

impl std::fmt::Debug for LocaleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleService")
            .field("default_locale", &self.default_locale)
            .field("brand", &self.brand)
            .field("cache", &self.cache)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryLocaleStore, StoreError};
    use async_trait::async_trait;
    use serde_json::Value;

    struct FailingStore;

    #[async_trait]
    impl LocaleStore for FailingStore {
        async fn get_document(&self, _key: &str) -> Result<Option<Value>, StoreError> {
            Err(StoreError::Backend("connection refused".to_string()))
        }

        async fn put_document(
            &self,
            _key: &str,
            _document: Value,
        ) -> Result<crate::store::StoreEntry, StoreError> {
            Err(StoreError::Backend("connection refused".to_string()))
        }

        async fn list_entries(&self) -> Result<Vec<crate::store::StoreEntry>, StoreError> {
            Err(StoreError::Backend("connection refused".to_string()))
        }
    }

    fn service_with_embedded() -> LocaleService {
        let store = Arc::new(MemoryLocaleStore::with_embedded("luminary"));
        LocaleService::new(store, &CacheRegistry::new(), "en-US", "luminary")
    }

    #[tokio::test]
    async fn test_load_supported_locale() {
        let service = service_with_embedded();
        let doc = service.load_locale("es-ES").await;

        assert_eq!(doc.locale, "es-ES");
        assert_eq!(doc.source, DocumentSource::Requested);
        assert_eq!(
            service.token(&doc, "api.errors.emailExists", None),
            "Ya existe una cuenta con esta dirección de correo."
        );
    }

    #[tokio::test]
    async fn test_unsupported_locale_falls_back_to_default() {
        let service = service_with_embedded();
        let doc = service.load_locale("fr-FR").await;

        assert_eq!(doc.locale, "en-US");
        assert_eq!(doc.source, DocumentSource::DefaultLocale);
        assert!(!doc.resolve("api.errors.notFound").is_missing());
    }

    #[tokio::test]
    async fn test_empty_store_serves_minimal_catalog() {
        let store = Arc::new(MemoryLocaleStore::new());
        let service = LocaleService::new(store, &CacheRegistry::new(), "en-US", "luminary");

        let doc = service.load_locale("en-US").await;
        assert_eq!(doc.source, DocumentSource::Minimal);
        assert_eq!(
            service.token(&doc, "api.errors.internalError", None),
            "An internal error occurred."
        );
    }

    #[tokio::test]
    async fn test_store_failure_serves_minimal_catalog() {
        let service = LocaleService::new(
            Arc::new(FailingStore),
            &CacheRegistry::new(),
            "en-US",
            "luminary",
        );

        let doc = service.load_locale("es-ES").await;
        assert_eq!(doc.source, DocumentSource::Minimal);
        assert!(!doc.resolve("api.errors.internalError").is_missing());
    }

    #[tokio::test]
    async fn test_documents_are_cached_and_clearable() {
        let service = service_with_embedded();

        service.load_locale("en-US").await;
        service.load_locale("en-US").await;
        assert_eq!(service.cached_documents(), 1);

        service.load_locale("es-ES").await;
        assert_eq!(service.cached_documents(), 2);

        service.clear_cache();
        assert_eq!(service.cached_documents(), 0);
    }

    #[tokio::test]
    async fn test_cached_default_serves_fallback_requests() {
        let service = service_with_embedded();

        // Prime the cache with the default locale, then request an
        // unsupported one; the cached document must be reused with its
        // source re-tagged.
        service.load_locale("en-US").await;
        let doc = service.load_locale("de-DE").await;

        assert_eq!(doc.locale, "en-US");
        assert_eq!(doc.source, DocumentSource::DefaultLocale);
        assert_eq!(service.cached_documents(), 1);
    }

    #[tokio::test]
    async fn test_format_date() {
        let service = service_with_embedded();
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        let en = service.format_date(date, "en-US");
        assert!(en.contains("March"));
        assert!(en.contains("2025"));

        let es = service.format_date(date, "es-ES");
        assert!(es.contains("marzo"));

        // Unknown locale degrades to the default representation
        assert_eq!(service.format_date(date, "xx-XX"), "2025-03-01");
    }
}
