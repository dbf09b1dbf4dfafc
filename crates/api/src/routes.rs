use crate::handlers;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, routing::get, Router};

/// Largest DNS message a client may POST (RFC 8484 §6).
pub const MAX_DNS_MESSAGE_SIZE: usize = 65535;

pub fn create_doh_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/dns-query",
            get(handlers::doh_query_get).post(handlers::doh_query_post),
        )
        .layer(DefaultBodyLimit::max(MAX_DNS_MESSAGE_SIZE))
        .with_state(state)
}
