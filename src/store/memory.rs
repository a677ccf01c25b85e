//! In-memory locale store.
//!
//! Used when no database is configured (single-node deployments, local
//! development) and throughout the test suite. Ships with the embedded
//! catalogs so a bare `luminary` binary still serves localized content.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use serde_json::Value;
use tracing::{debug, warn};

use super::{LocaleStore, StoreEntry, StoreError, catalog_key};

/// Catalogs compiled into the binary, one per supported locale.
const EMBEDDED_CATALOGS: [(&str, &str); 2] = [
    ("en-US", include_str!("catalogs/en-US.json")),
    ("es-ES", include_str!("catalogs/es-ES.json")),
];

struct StoredCatalog {
    version: u64,
    updated_at: chrono::DateTime<Utc>,
    document: Value,
}

/// Locale store holding catalogs in process memory.
pub struct MemoryLocaleStore {
    records: DashMap<String, StoredCatalog>,
}

impl MemoryLocaleStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Create a store seeded with the embedded catalogs for `brand`.
    pub fn with_embedded(brand: &str) -> Self {
        let store = Self::new();

        for (locale, raw) in EMBEDDED_CATALOGS {
            match serde_json::from_str::<Value>(raw) {
                Ok(document) => {
                    let key = catalog_key(locale, brand);
                    debug!("Seeded embedded catalog {}", key);
                    store.records.insert(
                        key,
                        StoredCatalog {
                            version: 1,
                            updated_at: Utc::now(),
                            document,
                        },
                    );
                }
                Err(e) => {
                    // An unparseable embedded catalog is a build defect;
                    // the locale service degrades to its minimal document.
                    warn!("Embedded catalog for {} is invalid: {}", locale, e);
                }
            }
        }

        store
    }
}

impl Default for MemoryLocaleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LocaleStore for MemoryLocaleStore {
    async fn get_document(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.records.get(key).map(|r| r.document.clone()))
    }

    async fn put_document(&self, key: &str, document: Value) -> Result<StoreEntry, StoreError> {
        let version = self.records.get(key).map(|r| r.version).unwrap_or(0) + 1;
        let updated_at = Utc::now();

        self.records.insert(
            key.to_string(),
            StoredCatalog {
                version,
                updated_at,
                document,
            },
        );

        Ok(StoreEntry {
            key: key.to_string(),
            version,
            updated_at,
        })
    }

    async fn list_entries(&self) -> Result<Vec<StoreEntry>, StoreError> {
        let mut entries: Vec<StoreEntry> = self
            .records
            .iter()
            .map(|r| StoreEntry {
                key: r.key().clone(),
                version: r.version,
                updated_at: r.updated_at,
            })
            .collect();

        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_embedded_catalogs_parse_and_load() {
        let store = MemoryLocaleStore::with_embedded("luminary");

        let doc = store
            .get_document("i18n:en-US:luminary")
            .await
            .unwrap()
            .expect("en-US catalog should be seeded");
        assert!(doc.get("api").is_some());

        let doc = store
            .get_document("i18n:es-ES:luminary")
            .await
            .unwrap()
            .expect("es-ES catalog should be seeded");
        assert!(doc.get("api").is_some());
    }

    #[tokio::test]
    async fn test_put_bumps_version() {
        let store = MemoryLocaleStore::new();
        let first = store
            .put_document("i18n:en-US:test", serde_json::json!({"a": 1}))
            .await
            .unwrap();
        let second = store
            .put_document("i18n:en-US:test", serde_json::json!({"a": 2}))
            .await
            .unwrap();

        assert_eq!(first.version, 1);
        assert_eq!(second.version, 2);
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let store = MemoryLocaleStore::new();
        assert!(
            store
                .get_document("i18n:fr-FR:test")
                .await
                .unwrap()
                .is_none()
        );
    }
}
