//! Luminary - localization and content composition service.
//!
//! Backend for a personalized astrology newsletter: resolves locale
//! catalogs, composes generation prompts biased by reader perspective,
//! renders localized email copy, and serves uniform locale-aware API
//! responses.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `store` - Locale catalog storage (MongoDB or embedded)
//! - `cache` - LRU-based caching with Moka
//! - `locale` - Locale resolution, token lookup, perspectives
//! - `models` - Shared domain types
//! - `compose` - Prompt template catalog and composers
//! - `email` - Outbound email copy rendering
//! - `api` - Response builders and the axum HTTP surface

mod api;
mod cache;
mod compose;
mod config;
mod email;
mod locale;
mod models;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use api::{ApiResponses, AppState, RequestThrottle};
use cache::CacheRegistry;
use compose::{LocalizedPromptComposer, PromptComposer};
use config::Config;
use locale::{LocaleService, Resolved};
use store::{LocaleStore, MemoryLocaleStore, MongoLocaleStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // Initialize logging with sensible defaults
    // If RUST_LOG is not set, default to "info" level for our crate
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("luminary=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Luminary content service...");

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded successfully");
    info!(
        "Default locale: {}, brand: {}",
        config.default_locale, config.brand
    );

    // Pick the locale store backend
    let store: Arc<dyn LocaleStore> = match &config.mongodb_uri {
        Some(uri) => {
            info!("Connecting to MongoDB...");
            let store = MongoLocaleStore::connect(uri, &config.mongodb_database).await?;
            info!("Locale store ready (MongoDB)");
            Arc::new(store)
        }
        None => {
            info!("MONGODB_URI not set, serving embedded locale catalogs");
            Arc::new(MemoryLocaleStore::with_embedded(&config.brand))
        }
    };

    // Initialize cache registry
    let registry = CacheRegistry::new();
    info!("Cache registry initialized");

    let service = LocaleService::new(
        Arc::clone(&store),
        &registry,
        config.default_locale.clone(),
        config.brand.clone(),
    );

    // The display brand name lives in the catalog; fall back to a
    // capitalized brand identifier if the catalog lacks it.
    let default_doc = service.load_locale(&config.default_locale).await;
    let brand_name = match default_doc.resolve("common.brand") {
        Resolved::Found(name) => name,
        Resolved::Missing(_) => display_brand(&config.brand),
    };
    info!("Serving content as {}", brand_name);

    let composer = LocalizedPromptComposer::new(service.clone(), PromptComposer::new(brand_name));
    let responses = ApiResponses::new(service.clone());

    let listen_port = config.listen_port;
    let state = AppState {
        config: Arc::new(config),
        locale: service,
        composer,
        responses,
        store,
        throttle: RequestThrottle::per_minute(30),
    };

    // Serve the API
    let address = SocketAddr::from(([0, 0, 0, 0], listen_port));
    let listener = tokio::net::TcpListener::bind(address).await?;
    info!("Listening on {}", address);

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shutdown complete");
    Ok(())
}

/// Capitalize the configured brand identifier for display.
fn display_brand(brand: &str) -> String {
    let mut chars = brand.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => brand.to_string(),
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    info!("Shutdown signal received");
}
