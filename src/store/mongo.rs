//! MongoDB-backed locale store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use super::{LocaleStore, StoreEntry, StoreError};

/// One stored catalog. The document is replaced whole on upload; the
/// version and timestamp exist for operational inspection only.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogRecord {
    key: String,
    version: u64,
    updated_at: DateTime<Utc>,
    document: Value,
}

/// Locale store backed by a MongoDB collection.
#[derive(Debug, Clone)]
pub struct MongoLocaleStore {
    collection: Collection<CatalogRecord>,
}

impl MongoLocaleStore {
    /// Connect to MongoDB with the given URI and database name.
    ///
    /// # Errors
    /// Returns error if connection fails.
    pub async fn connect(uri: &str, db_name: &str) -> anyhow::Result<Self> {
        let options = ClientOptions::parse(uri).await?;
        let client = Client::with_options(options)?;

        // Ping the database to verify connection
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        info!("Successfully connected to MongoDB");

        let collection = client.database(db_name).collection("i18n_documents");

        Ok(Self { collection })
    }
}

#[async_trait]
impl LocaleStore for MongoLocaleStore {
    async fn get_document(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let filter = doc! { "key": key };
        let record = self
            .collection
            .find_one(filter)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        Ok(record.map(|r| r.document))
    }

    async fn put_document(&self, key: &str, document: Value) -> Result<StoreEntry, StoreError> {
        let filter = doc! { "key": key };
        let current = self
            .collection
            .find_one(filter.clone())
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let record = CatalogRecord {
            key: key.to_string(),
            version: current.map(|r| r.version).unwrap_or(0) + 1,
            updated_at: Utc::now(),
            document,
        };

        let options = mongodb::options::ReplaceOptions::builder()
            .upsert(true)
            .build();

        self.collection
            .replace_one(filter, &record)
            .with_options(options)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        debug!("Stored catalog {} (v{})", record.key, record.version);

        Ok(StoreEntry {
            key: record.key,
            version: record.version,
            updated_at: record.updated_at,
        })
    }

    async fn list_entries(&self) -> Result<Vec<StoreEntry>, StoreError> {
        let mut cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let mut entries = Vec::new();
        while let Some(record) = cursor.next().await {
            let record = record.map_err(|e| StoreError::Backend(e.to_string()))?;
            entries.push(StoreEntry {
                key: record.key,
                version: record.version,
                updated_at: record.updated_at,
            });
        }

        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(entries)
    }
}
