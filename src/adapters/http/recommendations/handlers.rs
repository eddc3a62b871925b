//! HTTP handlers for the recommendation endpoint.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::error;

use crate::application::GenerateAdviceHandler;
use crate::ports::GenerationError;

use super::dto::{ErrorResponse, RecommendationsRequest, RecommendationsResponse};

/// Recommendation API error that implements IntoResponse.
pub enum RecommendationsApiError {
    BadRequest(String),
    RateLimited(String),
    Internal(String),
}

impl IntoResponse for RecommendationsApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            RecommendationsApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            RecommendationsApiError::RateLimited(msg) => (StatusCode::TOO_MANY_REQUESTS, msg),
            RecommendationsApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(ErrorResponse::new(error))).into_response()
    }
}

impl From<GenerationError> for RecommendationsApiError {
    fn from(error: GenerationError) -> Self {
        match error {
            GenerationError::MissingCredentials => {
                RecommendationsApiError::Internal("Google AI API key não configurada".to_string())
            }
            GenerationError::RateLimited { .. } => RecommendationsApiError::RateLimited(
                "Limite de consultas atingido. Tente novamente em alguns segundos.".to_string(),
            ),
            _ => RecommendationsApiError::Internal("Erro interno do servidor".to_string()),
        }
    }
}

/// Shared state for the recommendation routes.
#[derive(Clone)]
pub struct RecommendationsState {
    pub advice: Arc<GenerateAdviceHandler>,
}

impl RecommendationsState {
    pub fn new(advice: Arc<GenerateAdviceHandler>) -> Self {
        Self { advice }
    }
}

/// POST /api/recommendations
///
/// Returns three recommendations for the posted dish figures. An unusable
/// model response still answers 200 with the rule-based batch; only
/// transport-level failures surface as errors.
pub async fn generate_recommendations(
    State(state): State<RecommendationsState>,
    Json(request): Json<RecommendationsRequest>,
) -> Result<Json<RecommendationsResponse>, RecommendationsApiError> {
    let financials = request.into_financials().map_err(|_| {
        RecommendationsApiError::BadRequest("Parâmetros obrigatórios não fornecidos".to_string())
    })?;

    let report = state.advice.handle(&financials).await.map_err(|err| {
        error!(error = %err, "recommendation generation failed");
        RecommendationsApiError::from(err)
    })?;

    Ok(Json(RecommendationsResponse {
        recommendations: report.recommendations,
    }))
}
