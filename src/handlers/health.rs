use axum::{Json, extract::State};
use chrono::{SecondsFormat, Utc};

use crate::router::DeskState;
use crate::types::HealthResponse;

/// GET /api/health
pub async fn health(State(state): State<DeskState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        time: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        has_db: state.has_store(),
        env: state.binding_names(),
    })
}
