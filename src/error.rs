use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use sqlx::Error as SqlxError;
use std::error::Error as StdError;
use thiserror::Error as ThisError;
use tracing::{error, warn};

use crate::db::models::REQUIRED_FIELDS;

#[derive(Debug, ThisError)]
pub enum DeskError {
    #[error("缺少必填字段")]
    MissingFields { received: Value },

    #[error("年级必须是\"高一\"或\"高二\"")]
    InvalidGrade { received: String },

    #[error("数据库未绑定，请检查数据库配置")]
    StoreUnbound,

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    /// Failure while listing records; rendered with an explicit error type tag.
    #[error(transparent)]
    ListFailed(Box<DeskError>),

    #[error("Request body error: {0}")]
    BodyError(#[from] BytesRejection),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    ConfigError(#[from] Box<figment::Error>),
}

impl From<figment::Error> for DeskError {
    fn from(e: figment::Error) -> Self {
        DeskError::ConfigError(Box::new(e))
    }
}

impl DeskError {
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DeskError::MissingFields { .. } | DeskError::InvalidGrade { .. }
        )
    }

    /// Wrap a store failure (missing binding or failed statement) raised while
    /// listing, so it is reported with the `DATABASE_ERROR` tag.
    pub fn into_list_error(self) -> Self {
        match self {
            DeskError::DatabaseError(_) | DeskError::StoreUnbound => {
                DeskError::ListFailed(Box::new(self))
            }
            other => other,
        }
    }

    /// Render the error together with its source chain, one cause per line.
    pub fn diagnostic_trace(&self) -> String {
        if let DeskError::ListFailed(inner) = self {
            return inner.diagnostic_trace();
        }
        let mut trace = format!("{self:?}");
        let mut source = self.source();
        while let Some(cause) = source {
            trace.push_str("\n    caused by: ");
            trace.push_str(&cause.to_string());
            source = cause.source();
        }
        trace
    }
}

impl IntoResponse for DeskError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        if self.is_validation() {
            warn!(error = %message, "rejected invalid request body");
        } else {
            error!(error = %message, "request failed");
        }
        let stack = self.diagnostic_trace();
        let (status, body) = match self {
            DeskError::MissingFields { received } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    error: message,
                    required: Some(REQUIRED_FIELDS.to_vec()),
                    received: Some(received),
                    ..Default::default()
                },
            ),
            DeskError::InvalidGrade { received } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    error: message,
                    received: Some(Value::String(received)),
                    ..Default::default()
                },
            ),
            DeskError::ListFailed(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    error: message,
                    stack: Some(stack),
                    kind: Some("DATABASE_ERROR"),
                    ..Default::default()
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    error: message,
                    stack: Some(stack),
                    ..Default::default()
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}

/// Wire shape shared by every API error response.
#[derive(Debug, Default, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub received: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn validation_errors_are_classified() {
        assert!(DeskError::MissingFields { received: json!({}) }.is_validation());
        assert!(
            DeskError::InvalidGrade {
                received: "高三".to_string()
            }
            .is_validation()
        );
        assert!(!DeskError::StoreUnbound.is_validation());
    }

    #[test]
    fn diagnostic_trace_includes_source_chain() {
        let err = DeskError::DatabaseError(SqlxError::RowNotFound);
        let trace = err.diagnostic_trace();
        assert!(trace.starts_with("DatabaseError"));
        assert!(trace.contains("caused by: "));
    }

    #[test]
    fn list_failures_keep_the_inner_message_and_trace() {
        let err = DeskError::StoreUnbound.into_list_error();
        assert!(matches!(err, DeskError::ListFailed(_)));
        assert_eq!(err.to_string(), DeskError::StoreUnbound.to_string());
        assert_eq!(err.diagnostic_trace(), "StoreUnbound");

        let err = DeskError::DatabaseError(SqlxError::RowNotFound).into_list_error();
        assert!(err.diagnostic_trace().starts_with("DatabaseError"));

        let err = DeskError::JsonError(serde_json::from_str::<Value>("{").unwrap_err());
        assert!(matches!(err.into_list_error(), DeskError::JsonError(_)));
    }

    #[test]
    fn error_body_omits_absent_fields() {
        let body = ApiErrorBody {
            error: "boom".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(body).expect("serialize");
        assert_eq!(value, json!({ "error": "boom" }));
    }
}
