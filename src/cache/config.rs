//! Cache configuration.

use std::time::Duration;

/// Configuration for a cache instance.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of entries in the cache.
    pub max_capacity: u64,

    /// Time-to-live for cache entries.
    /// After this duration, entries are automatically evicted.
    pub ttl: Option<Duration>,

    /// Time-to-idle for cache entries.
    /// Entries are evicted if not accessed within this duration.
    pub tti: Option<Duration>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            ttl: Some(Duration::from_secs(300)), // 5 minutes
            tti: None,
        }
    }
}

impl CacheConfig {
    /// Create config for locale catalogs.
    ///
    /// The supported (locale, brand) set is tiny and documents only change
    /// by full replacement, so a long TTL bounds staleness without a
    /// separate invalidation path.
    pub fn locale_documents() -> Self {
        Self {
            max_capacity: 64,
            ttl: Some(Duration::from_secs(3600)), // 1 hour
            tti: None,
        }
    }
}
