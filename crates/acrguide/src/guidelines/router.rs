use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use super::domain::{FindingValues, Outcome};
use super::service::{EvaluationError, GuidelineService};

/// Router builder exposing the guideline catalogue and evaluation endpoints.
pub fn guideline_router(service: Arc<GuidelineService>) -> Router {
    Router::new()
        .route("/api/v1/guidelines", get(catalogue_handler))
        .route("/api/v1/guidelines/:guideline_id", get(describe_handler))
        .route(
            "/api/v1/guidelines/:guideline_id/evaluate",
            post(evaluate_handler),
        )
        .with_state(service)
}

#[derive(Debug, Serialize)]
pub struct EvaluationResponse {
    pub guideline_id: String,
    pub tier_label: &'static str,
    pub outcome: Outcome,
}

pub(crate) async fn catalogue_handler(State(service): State<Arc<GuidelineService>>) -> Response {
    (StatusCode::OK, Json(service.catalogue())).into_response()
}

pub(crate) async fn describe_handler(
    State(service): State<Arc<GuidelineService>>,
    Path(guideline_id): Path<String>,
) -> Response {
    match service.describe(&guideline_id) {
        Ok(definition) => (StatusCode::OK, Json(definition)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn evaluate_handler(
    State(service): State<Arc<GuidelineService>>,
    Path(guideline_id): Path<String>,
    Json(values): Json<FindingValues>,
) -> Response {
    match service.evaluate(&guideline_id, &values) {
        Ok(outcome) => {
            let body = EvaluationResponse {
                guideline_id,
                tier_label: outcome.tier.label(),
                outcome,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(error) => error_response(error),
    }
}

fn error_response(error: EvaluationError) -> Response {
    match error {
        EvaluationError::UnknownGuideline(_) => {
            let payload = json!({
                "error": error.to_string(),
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        EvaluationError::IncompleteFinding { guideline_id } => {
            let payload = json!({
                "error": "incomplete finding",
                "guideline_id": guideline_id,
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}
