//! API router.

use axum::Router;
use axum::routing::{get, post, put};

use super::handlers::{
    AppState, clear_cache, compose, email_preview, healthz, list_locales, not_found,
    upload_catalog,
};

/// Build the service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/v1/prompts/compose", post(compose))
        .route("/v1/emails/preview", post(email_preview))
        .route("/v1/admin/locales", get(list_locales))
        .route("/v1/admin/locales/:locale", put(upload_catalog))
        .route("/v1/admin/cache/clear", post(clear_cache))
        .fallback(not_found)
        .with_state(state)
}
