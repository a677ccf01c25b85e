//! Configuration module for the Luminary content service.
//!
//! Loads configuration from environment variables.

use std::env;

use url::Url;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Default locale code used when negotiation yields nothing usable.
    pub default_locale: String,

    /// Brand identifier. Locale documents are stored per (locale, brand).
    pub brand: String,

    /// Port the HTTP API listens on.
    pub listen_port: u16,

    /// Public base URL of the site, used to build unsubscribe links
    /// in rendered email copy.
    pub public_url: Url,

    // MongoDB (optional - the embedded catalog store is used when unset)
    pub mongodb_uri: Option<String>,
    pub mongodb_database: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Panics
    /// Panics if a set variable fails to parse (bad `PUBLIC_URL` or `PORT`).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let default_locale = env::var("DEFAULT_LOCALE").unwrap_or_else(|_| "en-US".to_string());

        let brand = env::var("BRAND")
            .ok()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "luminary".to_string());

        let listen_port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()
            .expect("PORT must be a valid port number");

        let public_url =
            env::var("PUBLIC_URL").unwrap_or_else(|_| "https://luminary.example".to_string());
        let public_url = Url::parse(&public_url).expect("Invalid PUBLIC_URL format");

        let mongodb_uri = env::var("MONGODB_URI")
            .ok()
            .filter(|s| !s.trim().is_empty());

        Self {
            default_locale,
            brand,
            listen_port,
            public_url,
            mongodb_uri,
            mongodb_database: env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "luminary".to_string()),
        }
    }
}
