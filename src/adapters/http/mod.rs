//! HTTP adapters - axum routes exposing the application layer.

pub mod recommendations;

use axum::routing::get;
use axum::Router;

use recommendations::{recommendation_routes, RecommendationsState};

/// Builds the full API router.
pub fn api_router(state: RecommendationsState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(recommendation_routes(state))
}

/// GET /health - liveness probe.
async fn health() -> &'static str {
    "ok"
}
