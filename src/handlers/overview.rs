// Overview handler
// Per-collection document totals for the school dashboard

use axum::{extract::State, Json};
use serde::{ser::SerializeMap, Serialize, Serializer};
use tracing::{info, warn};

use super::AppState;
use crate::{db::DocumentStore, error::ApiResult};

/// Collections counted by the overview, in response order.
pub const OVERVIEW_COLLECTIONS: [&str; 5] = ["student", "teacher", "course", "enrollment", "announcement"];

/// Counts keyed by collection name, serialized as a JSON object in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionCounts(Vec<(&'static str, u64)>);

impl CollectionCounts {
    pub fn get(&self, collection: &str) -> Option<u64> {
        self.0
            .iter()
            .find(|(name, _)| *name == collection)
            .map(|(_, count)| *count)
    }
}

impl Serialize for CollectionCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, count) in &self.0 {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub ok: bool,
    pub counts: CollectionCounts,
}

/// GET /api/overview
pub async fn get_overview(State(state): State<AppState>) -> ApiResult<Json<OverviewResponse>> {
    info!("Fetching collection overview");

    let store = state.require_store().await?;
    let counts = collect_counts(store.as_ref()).await;

    info!("Overview counts: {:?}", counts);
    Ok(Json(OverviewResponse { ok: true, counts }))
}

/// Counts each overview collection. A failed count is recorded as zero and
/// does not affect the others.
pub async fn collect_counts(store: &dyn DocumentStore) -> CollectionCounts {
    let mut counts = Vec::with_capacity(OVERVIEW_COLLECTIONS.len());

    for name in OVERVIEW_COLLECTIONS {
        let count = match store.count_documents(name).await {
            Ok(count) => count,
            Err(e) => {
                warn!("Counting '{}' failed, reporting 0: {}", name, e);
                0
            }
        };
        counts.push((name, count));
    }

    CollectionCounts(counts)
}
