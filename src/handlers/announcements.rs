// Announcement handlers
// Latest announcements, pinned first, then newest publish date

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use chrono::SecondsFormat;
use mongodb::bson::{doc, Bson, DateTime, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::AppState;
use crate::{
    db::{DocumentStore, FindSpec, StoreError},
    error::{ApiError, ApiResult},
};

pub const ANNOUNCEMENT_COLLECTION: &str = "announcement";

pub const DEFAULT_LIMIT: i64 = 5;

/// Query parameters for listing announcements
#[derive(Debug, Deserialize)]
pub struct ListAnnouncementsQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

#[derive(Debug, Serialize)]
pub struct AnnouncementsResponse {
    pub ok: bool,
    pub items: Vec<Map<String, Value>>,
}

/// GET /api/announcements?limit=<n>
///
/// `limit=0` returns every announcement rather than none.
pub async fn get_announcements(
    State(state): State<AppState>,
    query: Result<Query<ListAnnouncementsQuery>, QueryRejection>,
) -> ApiResult<Json<AnnouncementsResponse>> {
    let Query(params) = query.map_err(|rejection| ApiError::validation(rejection.body_text()))?;
    info!("Fetching announcements with limit: {}", params.limit);

    let store = state.require_store().await?;
    let documents = fetch_announcements(store.as_ref(), params.limit)
        .await
        .map_err(|e| ApiError::internal(e, state.expose_internal_errors))?;

    let items: Vec<_> = documents.into_iter().map(normalize_announcement).collect();

    info!("Retrieved {} announcements", items.len());
    Ok(Json(AnnouncementsResponse { ok: true, items }))
}

/// Runs the feed query. If the store rejects the sort, the same query is
/// repeated unsorted instead of failing.
pub async fn fetch_announcements(
    store: &dyn DocumentStore,
    limit: i64,
) -> Result<Vec<Document>, StoreError> {
    let limit = (limit != 0).then_some(limit);
    let sorted = FindSpec {
        sort: Some(doc! { "pinned": -1, "publish_at": -1 }),
        limit,
    };

    match store.find(ANNOUNCEMENT_COLLECTION, sorted).await {
        Err(StoreError::SortRejected(reason)) => {
            warn!("Announcement sort rejected, using natural order: {}", reason);
            store
                .find(ANNOUNCEMENT_COLLECTION, FindSpec { sort: None, limit })
                .await
        }
        result => result,
    }
}

/// Converts a stored announcement into response JSON: `_id` becomes a string,
/// `publish_at` becomes ISO-8601 text, field order is kept. A missing `_id`
/// is appended after the stored fields.
pub fn normalize_announcement(document: Document) -> Map<String, Value> {
    let mut item = Map::new();
    let has_id = document.contains_key("_id");

    for (key, value) in document {
        let value = match key.as_str() {
            "_id" => Value::String(render_id(Some(value))),
            "publish_at" => match value {
                Bson::DateTime(at) => Value::String(iso_timestamp(at)),
                other => bson_to_json(other),
            },
            _ => bson_to_json(value),
        };
        item.insert(key, value);
    }

    if !has_id {
        item.insert("_id".to_string(), Value::String(render_id(None)));
    }

    item
}

/// Null and absent ids share the same text.
fn render_id(id: Option<Bson>) -> String {
    match id {
        Some(Bson::ObjectId(oid)) => oid.to_hex(),
        Some(Bson::String(id)) => id,
        Some(Bson::Null) | None => "None".to_string(),
        Some(other) => other.to_string(),
    }
}

/// UTC, millisecond precision, `Z` suffix.
pub fn iso_timestamp(at: DateTime) -> String {
    at.to_chrono().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Value-for-value BSON to JSON. Store-native types become strings so no
/// extended-JSON wrappers reach the client.
fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::Double(v) => serde_json::Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Bson::String(s) => Value::String(s),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::Document(document) => Value::Object(
            document
                .into_iter()
                .map(|(key, value)| (key, bson_to_json(value)))
                .collect(),
        ),
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Null | Bson::Undefined => Value::Null,
        Bson::Int32(v) => Value::from(v),
        Bson::Int64(v) => Value::from(v),
        Bson::DateTime(at) => Value::String(iso_timestamp(at)),
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        other => other.into_relaxed_extjson(),
    }
}
