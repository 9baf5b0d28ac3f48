//! HTTP boundary: one prediction endpoint and a read-only health probe.
//!
//! The transport owns nothing the core needs; it validates shape at the edge
//! (typed extractors), hands the observation to the shared [`Predictor`] on
//! the blocking pool, and maps core errors to status codes.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::predictor::{Mode, Predictor, PredictorError, ScoredCondition, SymptomObservation};

/// Shared state for all request handlers. The predictor and its artifacts
/// are immutable after startup, so cloning the state is an `Arc` bump.
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub symptoms: SymptomObservation,
    #[serde(rename = "type")]
    pub mode: Mode,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub predictions: Vec<ScoredCondition>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// False only when no model slot is populated at all ("not ready").
    pub ok: bool,
    pub acute: bool,
    pub chronic: bool,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request: {0}")]
    BadRequest(String),
    #[error("No model loaded; service not ready")]
    NotReady,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail.clone()),
            ApiError::NotReady => (
                StatusCode::SERVICE_UNAVAILABLE,
                "No model loaded; service not ready".to_string(),
            ),
            ApiError::Internal(detail) => {
                log::error!("internal error serving request: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<PredictorError> for ApiError {
    fn from(err: PredictorError) -> Self {
        match err {
            PredictorError::ValidationError(msg) => ApiError::BadRequest(msg),
            PredictorError::NotReady => ApiError::NotReady,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Builds the service router. CORS is permissive, as the browser frontend is
/// served from arbitrary origins.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Scoring is synchronous CPU-bound work, so it runs on the blocking pool
/// rather than starving the cooperative executor.
async fn predict(
    State(state): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let predictor = Arc::clone(&state.predictor);
    let result = tokio::task::spawn_blocking(move || predictor.predict(&req.symptoms, req.mode))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;

    Ok(Json(PredictResponse {
        predictions: result.predictions,
        message: result.message,
    }))
}

/// Direct reflection of artifact-store state at startup; no core logic.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let info = state.predictor.info();
    Json(HealthResponse {
        ok: info.acute_loaded || info.chronic_loaded,
        acute: info.acute_loaded,
        chronic: info.chronic_loaded,
    })
}
