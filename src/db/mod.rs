//! Access to the document store.
//!
//! Handlers never talk to the driver directly. They receive a [`DatabaseHandle`]
//! through the router state, resolve it to a [`DocumentStore`] and issue one
//! query. The handle may be disabled, present but empty, or backed by a lazily
//! connected MongoDB client.

pub mod mongo;

#[cfg(test)]
pub mod memory;

use std::sync::Arc;

use futures_util::future::BoxFuture;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::config::{DatabaseConfig, DatabaseSettings};

pub use mongodb::bson::Document;
pub use mongo::MongoStore;

/// Options for a `find` over a whole collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindSpec {
    pub sort: Option<Document>,
    /// `None` means no cap. Negative values keep the store's single-batch meaning.
    pub limit: Option<i64>,
}

#[derive(Error, Debug)]
pub enum StoreError {
    /// The store refused the sort specification.
    #[error("{0}")]
    SortRejected(String),

    #[error("{0}")]
    Query(String),
}

/// The operations the HTTP layer needs from a document store.
pub trait DocumentStore: Send + Sync {
    fn name(&self) -> &str;

    fn list_collection_names(&self) -> BoxFuture<'_, Result<Vec<String>, StoreError>>;

    /// Counts every document in `collection` (empty filter).
    fn count_documents<'a>(&'a self, collection: &'a str) -> BoxFuture<'a, Result<u64, StoreError>>;

    /// Fetches every document in `collection` (empty filter), sorted and capped per `spec`.
    fn find<'a>(
        &'a self,
        collection: &'a str,
        spec: FindSpec,
    ) -> BoxFuture<'a, Result<Vec<Document>, StoreError>>;
}

#[derive(Error, Debug)]
pub enum HandleError {
    #[error("Database module not found")]
    ModuleNotFound,

    #[error("{0}")]
    Init(String),
}

enum HandleSource {
    Disabled,
    Empty,
    Lazy {
        config: DatabaseConfig,
        store: OnceCell<Arc<dyn DocumentStore>>,
    },
    Ready(Arc<dyn DocumentStore>),
}

/// Process-wide database handle, built once at startup and shared through `AppState`.
pub struct DatabaseHandle {
    source: HandleSource,
}

impl DatabaseHandle {
    pub fn from_settings(settings: DatabaseSettings) -> Self {
        match settings {
            DatabaseSettings::Disabled => {
                warn!("DATABASE_URL and DATABASE_NAME are not set, database support is disabled");
                Self::disabled()
            }
            DatabaseSettings::Incomplete => {
                warn!("Only one of DATABASE_URL and DATABASE_NAME is set, database handle left uninitialized");
                Self::uninitialized()
            }
            DatabaseSettings::Configured(config) => {
                info!("Database '{}' configured, connecting on first use", config.name);
                Self::lazy(config)
            }
        }
    }

    pub fn disabled() -> Self {
        Self { source: HandleSource::Disabled }
    }

    pub fn uninitialized() -> Self {
        Self { source: HandleSource::Empty }
    }

    pub fn lazy(config: DatabaseConfig) -> Self {
        Self {
            source: HandleSource::Lazy {
                config,
                store: OnceCell::new(),
            },
        }
    }

    pub fn from_store(store: Arc<dyn DocumentStore>) -> Self {
        Self { source: HandleSource::Ready(store) }
    }

    /// Resolves the handle. `Ok(None)` is a handle that exists but holds no database.
    ///
    /// A lazy handle builds its client on the first call; a failed build is not
    /// remembered, so the next call tries again.
    pub async fn resolve(&self) -> Result<Option<Arc<dyn DocumentStore>>, HandleError> {
        match &self.source {
            HandleSource::Disabled => Err(HandleError::ModuleNotFound),
            HandleSource::Empty => Ok(None),
            HandleSource::Ready(store) => Ok(Some(Arc::clone(store))),
            HandleSource::Lazy { config, store } => {
                let store = store
                    .get_or_try_init(|| async {
                        let connected = MongoStore::connect(config)
                            .await
                            .map_err(|e| HandleError::Init(e.to_string()))?;
                        Ok::<_, HandleError>(Arc::new(connected) as Arc<dyn DocumentStore>)
                    })
                    .await?;
                Ok(Some(Arc::clone(store)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;

    #[tokio::test]
    async fn test_disabled_handle_reports_missing_module() {
        let handle = DatabaseHandle::from_settings(DatabaseSettings::Disabled);
        assert!(matches!(handle.resolve().await, Err(HandleError::ModuleNotFound)));
    }

    #[tokio::test]
    async fn test_incomplete_settings_resolve_to_empty_handle() {
        let handle = DatabaseHandle::from_settings(DatabaseSettings::Incomplete);
        assert!(matches!(handle.resolve().await, Ok(None)));
    }

    #[tokio::test]
    async fn test_ready_handle_returns_same_store() {
        let handle = DatabaseHandle::from_store(Arc::new(MemoryStore::new("school")));

        let first = handle.resolve().await.expect("resolve failed").expect("handle empty");
        let second = handle.resolve().await.expect("resolve failed").expect("handle empty");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.name(), "school");
    }

    #[tokio::test]
    async fn test_lazy_handle_surfaces_client_errors() {
        let handle = DatabaseHandle::lazy(DatabaseConfig {
            url: "not-a-connection-string".to_string(),
            name: "school".to_string(),
        });

        match handle.resolve().await {
            Err(HandleError::Init(message)) => assert!(!message.is_empty()),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected client construction to fail"),
        }
        // Not cached: the second attempt fails the same way instead of panicking.
        assert!(matches!(handle.resolve().await, Err(HandleError::Init(_))));
    }
}
