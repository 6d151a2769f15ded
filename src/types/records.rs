use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::models::{Grade, NewRecord, Record};
use crate::error::DeskError;

/// Body of `POST /api/records`.
///
/// Every field is optional at the schema level so that absence can be reported
/// as a validation error instead of a decode failure.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateRecordRequest {
    pub date: Option<String>,
    pub grade: Option<String>,
    pub department: Option<String>,
    pub content: Option<String>,
}

impl CreateRecordRequest {
    /// Decode and validate a raw JSON body.
    ///
    /// A body that is valid JSON but does not fit the schema (wrong field types,
    /// not an object) is treated the same as one with missing fields.
    pub fn validate(body: Value) -> Result<NewRecord, DeskError> {
        let request = match serde_json::from_value::<CreateRecordRequest>(body.clone()) {
            Ok(req) => req,
            Err(_) => return Err(DeskError::MissingFields { received: body }),
        };

        let (Some(date), Some(grade), Some(department), Some(content)) = (
            present(request.date),
            present(request.grade),
            present(request.department),
            present(request.content),
        ) else {
            return Err(DeskError::MissingFields { received: body });
        };

        let grade: Grade = grade
            .parse()
            .map_err(|_| DeskError::InvalidGrade { received: grade })?;

        Ok(NewRecord {
            date,
            grade,
            department,
            content,
        })
    }
}

fn present(field: Option<String>) -> Option<String> {
    field.filter(|s| !s.is_empty())
}

#[derive(Debug, Serialize)]
pub struct RecordList {
    pub records: Vec<Record>,
    pub count: usize,
}

impl From<Vec<Record>> for RecordList {
    fn from(records: Vec<Record>) -> Self {
        let count = records.len();
        Self { records, count }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct InitResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: &'static str,
    pub time: String,
    #[serde(rename = "hasDB")]
    pub has_db: bool,
    pub env: Vec<&'static str>,
}
