// Schema catalogue handler
// Publishes the record schemas for external database viewers

use axum::Json;
use serde::Serialize;

use crate::models::{catalogue, SchemaDescriptor};

#[derive(Debug, Serialize)]
pub struct SchemaCatalogue {
    pub schemas: Vec<SchemaDescriptor>,
}

/// GET /schema
pub async fn list_schemas() -> Json<SchemaCatalogue> {
    Json(SchemaCatalogue { schemas: catalogue() })
}
