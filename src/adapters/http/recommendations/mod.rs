//! HTTP surface for the recommendation endpoint.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::RecommendationsState;
pub use routes::recommendation_routes;
