// Handlers module
// HTTP handlers for the read-only school records API

pub mod announcements;
pub mod diagnostics;
pub mod overview;
pub mod schema;

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::{
    config::Config,
    db::{DatabaseHandle, DocumentStore, HandleError},
    error::ApiError,
    middleware::create_middleware_stack,
};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseHandle>,
    pub expose_internal_errors: bool,
}

impl AppState {
    pub fn new(db: DatabaseHandle, config: &Config) -> Self {
        Self {
            db: Arc::new(db),
            expose_internal_errors: config.expose_internal_errors,
        }
    }

    /// Resolves the database for the data endpoints. Missing configuration
    /// keeps its fixed detail; only connection failures may be redacted.
    pub async fn require_store(&self) -> Result<Arc<dyn DocumentStore>, ApiError> {
        match self.db.resolve().await {
            Ok(Some(store)) => Ok(store),
            Ok(None) => Err(ApiError::NotConfigured),
            Err(HandleError::ModuleNotFound) => Err(ApiError::ModuleNotFound),
            Err(e) => Err(ApiError::internal(e, self.expose_internal_errors)),
        }
    }
}

/// Create the Axum router with all endpoints and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Liveness
        .route("/", get(read_root))
        .route("/api/hello", get(hello))
        // Diagnostics and schema catalogue
        .route("/test", get(diagnostics::test_database))
        .route("/schema", get(schema::list_schemas))
        // Data endpoints
        .route("/api/overview", get(overview::get_overview))
        .route("/api/announcements", get(announcements::get_announcements))
        .with_state(state)
        .layer(create_middleware_stack())
}

/// GET /
pub async fn read_root() -> Json<Value> {
    Json(json!({ "message": "Hello from FastAPI Backend!" }))
}

/// GET /api/hello
pub async fn hello() -> Json<Value> {
    Json(json!({ "message": "Hello from the backend API!" }))
}
