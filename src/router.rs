use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use std::path::Path;
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::db::RecordStore;
use crate::error::DeskError;
use crate::handlers::{create_record, delete_record, health, init_schema, list_records, login, stats};
use crate::middleware::cors;
use crate::service::AccountDirectory;

pub const API_PREFIX: &str = "/api";

/// Shared, read-only application state. Collaborators are injected here at
/// construction; nothing is looked up ambiently.
#[derive(Clone)]
pub struct DeskState {
    pub store: Option<RecordStore>,
    pub accounts: Arc<dyn AccountDirectory>,
    pub assets: Option<ServeDir>,
}

impl DeskState {
    pub fn new(store: Option<RecordStore>, accounts: Arc<dyn AccountDirectory>) -> Self {
        Self {
            store,
            accounts,
            assets: None,
        }
    }

    /// Serve non-API paths from `dir`.
    pub fn with_assets(mut self, dir: impl AsRef<Path>) -> Self {
        self.assets = Some(ServeDir::new(dir));
        self
    }

    pub fn store(&self) -> Result<&RecordStore, DeskError> {
        self.store.as_ref().ok_or(DeskError::StoreUnbound)
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    /// Names of the collaborators bound to this instance.
    pub fn binding_names(&self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(2);
        if self.store.is_some() {
            names.push("DB");
        }
        if self.assets.is_some() {
            names.push("ASSETS");
        }
        names
    }
}

pub fn is_api_path(path: &str) -> bool {
    path.starts_with(API_PREFIX)
}

pub fn desk_router(state: DeskState) -> Router {
    Router::new()
        .route("/api/health", get(health).fallback(api_not_found))
        .route("/api/init", get(init_schema).fallback(api_not_found))
        .route(
            "/api/records",
            get(list_records).post(create_record).fallback(api_not_found),
        )
        .route(
            "/api/records/{id}",
            delete(delete_record).fallback(api_not_found),
        )
        .route("/api/stats", get(stats).fallback(api_not_found))
        .route("/api/login", post(login).fallback(api_not_found))
        .fallback(passthrough)
        .layer(middleware::from_fn(cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn api_not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

/// Anything no route claimed: API paths get a 404, everything else goes to the
/// static asset directory when one is bound.
async fn passthrough(State(state): State<DeskState>, req: Request) -> Response {
    if is_api_path(req.uri().path()) {
        return api_not_found().await;
    }
    let Some(assets) = state.assets else {
        return StatusCode::NOT_FOUND.into_response();
    };
    match assets.oneshot(req).await {
        Ok(resp) => resp.into_response(),
        Err(never) => match never {},
    }
}
