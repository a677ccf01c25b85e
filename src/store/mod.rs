//! Locale store - key-value storage for locale catalogs.
//!
//! One JSON document per (locale, brand) pair, keyed
//! `i18n:{locale}:{brand}`. Documents are authored offline and uploaded
//! as atomic blobs; reads at request time never see a partial document.

mod memory;
mod mongo;

pub use memory::MemoryLocaleStore;
pub use mongo::MongoLocaleStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Build the storage key for a (locale, brand) pair.
pub fn catalog_key(locale: &str, brand: &str) -> String {
    format!("i18n:{}:{}", locale, brand)
}

/// Metadata for one stored catalog, as listed by the admin API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreEntry {
    pub key: String,
    pub version: u64,
    pub updated_at: DateTime<Utc>,
}

/// Errors surfaced by a locale store backend.
///
/// The locale service converts every one of these into its fallback
/// chain; they never reach an API handler.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store backend unavailable: {0}")]
    Backend(String),

    #[error("stored document is not valid JSON: {0}")]
    Malformed(String),
}

/// Key-value contract for locale catalogs.
#[async_trait]
pub trait LocaleStore: Send + Sync {
    /// Fetch a catalog document by key. `Ok(None)` means "not stored".
    async fn get_document(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replace the document under `key` in full, bumping its version.
    async fn put_document(&self, key: &str, document: Value) -> Result<StoreEntry, StoreError>;

    /// List stored catalogs (metadata only).
    async fn list_entries(&self) -> Result<Vec<StoreEntry>, StoreError>;
}
