use axum::{Json, extract::State};
use serde_json::Value;
use tracing::{info, warn};

use crate::error::DeskError;
use crate::middleware::JsonBody;
use crate::router::DeskState;
use crate::types::LoginRequest;
use crate::types::login::{BAD_REQUEST_BODY, LoginResponse, WRONG_CREDENTIALS};

/// POST /api/login -> checks the account table. Always answers 200.
pub async fn login(
    State(state): State<DeskState>,
    body: Result<JsonBody<Value>, DeskError>,
) -> Json<LoginResponse> {
    let request = match body {
        Ok(JsonBody(value)) => LoginRequest::from_value(&value),
        Err(e) => {
            warn!(error = %e, "unparseable login body");
            None
        }
    };
    let Some(request) = request else {
        return Json(LoginResponse::rejected(BAD_REQUEST_BODY));
    };

    match (request.username, request.password) {
        (Some(username), Some(password)) if state.accounts.verify(&username, &password) => {
            info!(username = %username, "login accepted");
            Json(LoginResponse::accepted(username))
        }
        (username, _) => {
            warn!(username = ?username, "login rejected");
            Json(LoginResponse::rejected(WRONG_CREDENTIALS))
        }
    }
}
