//! Cache module - Modular caching system using Moka.
//!
//! The pipeline keeps exactly one class of shared mutable state: resolved
//! locale catalogs. The registry pattern keeps that explicit - the locale
//! service asks the registry for its own named cache and owns it; nothing
//! else can reach in and mutate entries.
//!
//! ## Architecture
//!
//! - `CacheRegistry` - Central registry holding all named caches
//! - `TypedCache` - Typed wrapper over a Moka sync cache
//! - `CacheConfig` - Capacity/TTL settings with per-domain presets

mod config;
mod registry;
mod typed;

pub use config::CacheConfig;
pub use registry::CacheRegistry;
pub use typed::TypedCache;
