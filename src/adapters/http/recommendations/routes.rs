//! HTTP routes for the recommendation endpoint.

use axum::routing::post;
use axum::Router;

use super::handlers::{generate_recommendations, RecommendationsState};

/// Creates the recommendation router.
pub fn recommendation_routes(state: RecommendationsState) -> Router {
    Router::new()
        // POST /api/recommendations
        .route("/api/recommendations", post(generate_recommendations))
        .with_state(state)
}
