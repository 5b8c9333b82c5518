use std::time::Instant;

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::services::{self, PlanError};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/plan/analyze", post(analyze))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    error: &'static str,
    request_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

#[instrument(skip(state, body))]
pub async fn analyze(State(state): State<AppState>, body: String) -> Response {
    let request_id = Uuid::new_v4();
    let started = Instant::now();
    info!(%request_id, "plan analyze admitted");

    // The body is parsed here rather than by the Json extractor so that a
    // syntactically malformed body still gets the request-id error envelope.
    let outcome = match serde_json::from_str::<Value>(&body) {
        Ok(value) => services::analyze(&state, value).await,
        Err(e) => Err(PlanError::Invalid(vec![format!("body is not valid JSON: {e}")])),
    };

    match outcome {
        Ok(plan) => {
            info!(
                %request_id,
                elapsed_ms = started.elapsed().as_millis() as u64,
                meals = plan.meals.len(),
                calories = plan.daily_targets.calories,
                "plan analyze completed"
            );
            (StatusCode::OK, request_id_headers(request_id), Json(plan)).into_response()
        }
        Err(PlanError::Invalid(details)) => {
            warn!(%request_id, ?details, "invalid plan request");
            error_response(
                StatusCode::BAD_REQUEST,
                request_id,
                "invalid request body",
                Some(details),
            )
        }
        Err(PlanError::Format(msg)) => {
            // Detail stays server-side; the client only learns the category.
            error!(%request_id, %msg, "model output failed validation");
            error_response(
                StatusCode::BAD_GATEWAY,
                request_id,
                "model returned unexpected output",
                None,
            )
        }
        Err(PlanError::Provider(e)) => {
            error!(%request_id, error = %e, "completion provider call failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                request_id,
                "plan generation failed",
                None,
            )
        }
    }
}

fn error_response(
    status: StatusCode,
    request_id: Uuid,
    error: &'static str,
    details: Option<Vec<String>>,
) -> Response {
    (
        status,
        request_id_headers(request_id),
        Json(ErrorBody { error, request_id, details }),
    )
        .into_response()
}

fn request_id_headers(request_id: Uuid) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        headers.insert("x-request-id", value);
    }
    headers
}
