pub mod artworks;
pub mod health;

use axum::Router;

use crate::middleware;
use crate::state::AppState;

/// Assemble the full router with all route groups.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(artworks::routes())
        .with_state(state)
}

/// The router with body limit, request tracing and CORS applied.
pub fn build_app(state: AppState) -> Router {
    let max_bytes = state.config().body_limit_bytes;
    middleware::body_limit::limit_body(build_router(state), max_bytes)
        .layer(middleware::request_tracing::trace_layer())
        .layer(middleware::cors::cors_layer())
}
