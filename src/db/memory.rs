//! In-memory `DocumentStore` for tests, with switches to make individual
//! operations fail.

use std::cmp::Ordering;
use std::collections::HashSet;

use futures_util::{future::BoxFuture, FutureExt};
use mongodb::bson::{Bson, Document};

use super::{DocumentStore, FindSpec, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    name: String,
    collections: Vec<(String, Vec<Document>)>,
    failing_counts: HashSet<String>,
    sort_rejection: Option<String>,
    find_failure: Option<String>,
    listing_failure: Option<String>,
}

impl MemoryStore {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_documents(mut self, collection: &str, documents: Vec<Document>) -> Self {
        match self.collections.iter_mut().find(|(name, _)| name == collection) {
            Some((_, existing)) => existing.extend(documents),
            None => self.collections.push((collection.to_string(), documents)),
        }
        self
    }

    pub fn failing_count(mut self, collection: &str) -> Self {
        self.failing_counts.insert(collection.to_string());
        self
    }

    pub fn rejecting_sort(mut self, message: &str) -> Self {
        self.sort_rejection = Some(message.to_string());
        self
    }

    pub fn failing_find(mut self, message: &str) -> Self {
        self.find_failure = Some(message.to_string());
        self
    }

    pub fn failing_listing(mut self, message: &str) -> Self {
        self.listing_failure = Some(message.to_string());
        self
    }

    fn documents(&self, collection: &str) -> &[Document] {
        self.collections
            .iter()
            .find(|(name, _)| name == collection)
            .map(|(_, documents)| documents.as_slice())
            .unwrap_or(&[])
    }
}

impl DocumentStore for MemoryStore {
    fn name(&self) -> &str {
        &self.name
    }

    fn list_collection_names(&self) -> BoxFuture<'_, Result<Vec<String>, StoreError>> {
        async move {
            if let Some(message) = &self.listing_failure {
                return Err(StoreError::Query(message.clone()));
            }
            Ok(self.collections.iter().map(|(name, _)| name.clone()).collect())
        }
        .boxed()
    }

    fn count_documents<'a>(&'a self, collection: &'a str) -> BoxFuture<'a, Result<u64, StoreError>> {
        async move {
            if self.failing_counts.contains(collection) {
                return Err(StoreError::Query(format!("count on '{}' failed", collection)));
            }
            Ok(self.documents(collection).len() as u64)
        }
        .boxed()
    }

    fn find<'a>(
        &'a self,
        collection: &'a str,
        spec: FindSpec,
    ) -> BoxFuture<'a, Result<Vec<Document>, StoreError>> {
        async move {
            if let Some(message) = &self.find_failure {
                return Err(StoreError::Query(message.clone()));
            }

            let mut documents = self.documents(collection).to_vec();

            if let Some(sort) = &spec.sort {
                if let Some(message) = &self.sort_rejection {
                    return Err(StoreError::SortRejected(message.clone()));
                }
                documents.sort_by(|a, b| compare_documents(a, b, sort));
            }

            if let Some(limit) = spec.limit.filter(|limit| *limit != 0) {
                documents.truncate(limit.unsigned_abs() as usize);
            }

            Ok(documents)
        }
        .boxed()
    }
}

fn compare_documents(a: &Document, b: &Document, sort: &Document) -> Ordering {
    for (key, direction) in sort {
        let descending = matches!(direction, Bson::Int32(d) if *d < 0)
            || matches!(direction, Bson::Int64(d) if *d < 0);

        let ordering = compare_values(a.get(key), b.get(key));
        let ordering = if descending { ordering.reverse() } else { ordering };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

/// MongoDB's cross-type ordering, restricted to the types the tests use.
/// A missing field sorts like null.
fn compare_values(a: Option<&Bson>, b: Option<&Bson>) -> Ordering {
    static NULL: Bson = Bson::Null;
    let (a, b) = (a.unwrap_or(&NULL), b.unwrap_or(&NULL));

    match type_rank(a).cmp(&type_rank(b)) {
        Ordering::Equal => {}
        other => return other,
    }

    match (a, b) {
        (Bson::String(x), Bson::String(y)) => x.cmp(y),
        (Bson::Boolean(x), Bson::Boolean(y)) => x.cmp(y),
        (Bson::DateTime(x), Bson::DateTime(y)) => x.cmp(y),
        (Bson::ObjectId(x), Bson::ObjectId(y)) => x.bytes().cmp(&y.bytes()),
        (x, y) => match (as_number(x), as_number(y)) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
    }
}

fn type_rank(value: &Bson) -> u8 {
    match value {
        Bson::Null | Bson::Undefined => 1,
        Bson::Int32(_) | Bson::Int64(_) | Bson::Double(_) | Bson::Decimal128(_) => 2,
        Bson::String(_) | Bson::Symbol(_) => 3,
        Bson::Document(_) => 4,
        Bson::Array(_) => 5,
        Bson::Binary(_) => 6,
        Bson::ObjectId(_) => 7,
        Bson::Boolean(_) => 8,
        Bson::DateTime(_) => 9,
        Bson::Timestamp(_) => 10,
        _ => 11,
    }
}

fn as_number(value: &Bson) -> Option<f64> {
    match value {
        Bson::Int32(v) => Some(f64::from(*v)),
        Bson::Int64(v) => Some(*v as f64),
        Bson::Double(v) => Some(*v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, DateTime};

    #[tokio::test]
    async fn test_sort_descending_with_missing_fields_last() {
        let store = MemoryStore::new("school").with_documents(
            "announcement",
            vec![
                doc! { "title": "a", "publish_at": DateTime::from_millis(1_000) },
                doc! { "title": "b" },
                doc! { "title": "c", "publish_at": DateTime::from_millis(3_000) },
            ],
        );

        let spec = FindSpec {
            sort: Some(doc! { "publish_at": -1 }),
            limit: None,
        };
        let documents = store.find("announcement", spec).await.expect("find failed");
        let titles: Vec<&str> = documents.iter().map(|d| d.get_str("title").unwrap()).collect();
        assert_eq!(titles, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_negative_limit_caps_by_magnitude() {
        let store = MemoryStore::new("school").with_documents(
            "announcement",
            vec![doc! { "n": 1 }, doc! { "n": 2 }, doc! { "n": 3 }],
        );

        let spec = FindSpec { sort: None, limit: Some(-2) };
        let documents = store.find("announcement", spec).await.expect("find failed");
        assert_eq!(documents.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_collection_is_empty() {
        let store = MemoryStore::new("school");
        assert_eq!(store.count_documents("teacher").await.expect("count failed"), 0);
        assert!(store
            .find("teacher", FindSpec::default())
            .await
            .expect("find failed")
            .is_empty());
    }
}
