//! HTTP API - localized response building, locale negotiation, routes.

pub mod handlers;
mod negotiate;
mod ratelimit;
mod responses;
mod routes;

pub use handlers::AppState;
pub use ratelimit::RequestThrottle;
pub use responses::ApiResponses;
pub use routes::router;
