use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::Value;
use tracing::info;

use crate::db::{Record, StatsSnapshot};
use crate::error::DeskError;
use crate::middleware::JsonBody;
use crate::router::{DeskState, api_not_found};
use crate::types::{CreateRecordRequest, CreatedResponse, InitResponse, RecordList, SuccessResponse};

/// GET /api/init -> creates the table (and grade column) when missing.
pub async fn init_schema(State(state): State<DeskState>) -> Result<Json<InitResponse>, DeskError> {
    let store = state.store()?;
    store.ensure_schema().await?;
    store.ensure_grade_column().await?;
    info!("records schema initialized");
    Ok(Json(InitResponse {
        success: true,
        message: "数据库表创建成功".to_string(),
    }))
}

/// GET /api/records -> every record, newest first.
pub async fn list_records(State(state): State<DeskState>) -> Result<Json<RecordList>, DeskError> {
    let records = migrate_and_list(&state)
        .await
        .map_err(DeskError::into_list_error)?;
    Ok(Json(records.into()))
}

async fn migrate_and_list(state: &DeskState) -> Result<Vec<Record>, DeskError> {
    let store = state.store()?;
    store.ensure_schema().await?;
    store.ensure_grade_column().await?;
    store.list().await
}

/// POST /api/records -> validates the body, inserts, returns the new id.
pub async fn create_record(
    State(state): State<DeskState>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Json<CreatedResponse>, DeskError> {
    let store = state.store()?;
    let record = CreateRecordRequest::validate(body)?;
    let id = store.create(&record).await?;
    info!(id, grade = %record.grade, department = %record.department, "record created");
    Ok(Json(CreatedResponse { success: true, id }))
}

/// DELETE /api/records/{id} -> succeeds whether or not the id exists.
pub async fn delete_record(
    State(state): State<DeskState>,
    Path(raw_id): Path<String>,
) -> Result<Response, DeskError> {
    if !is_record_id(&raw_id) {
        return Ok(api_not_found().await);
    }
    let store = state.store()?;
    match raw_id.parse::<i64>() {
        Ok(id) => {
            let affected = store.delete(id).await?;
            info!(id, affected, "record delete requested");
        }
        // No stored id can exceed i64, so there is nothing to delete.
        Err(_) => info!(id = %raw_id, "record id out of range; nothing deleted"),
    }
    Ok(Json(SuccessResponse { success: true }).into_response())
}

/// GET /api/stats -> aggregate counts; "today" is the current UTC calendar date.
pub async fn stats(State(state): State<DeskState>) -> Result<Json<StatsSnapshot>, DeskError> {
    let store = state.store()?;
    let today = Utc::now().format("%Y-%m-%d").to_string();
    Ok(Json(store.stats(&today).await?))
}

/// Only plain decimal digits name a record; anything else is not a route.
fn is_record_id(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit())
}
