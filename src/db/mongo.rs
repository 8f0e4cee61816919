use futures_util::{future::BoxFuture, FutureExt, TryStreamExt};
use mongodb::{
    bson::{doc, Document},
    error::{Error as MongoError, ErrorKind},
    options::FindOptions,
    Client, Database,
};
use tracing::{debug, error, info};

use super::{DocumentStore, FindSpec, StoreError};
use crate::config::DatabaseConfig;

/// Server error codes that mean "this sort cannot be executed":
/// BadValue, OperationFailed (legacy in-memory sort limit),
/// QueryExceededMemoryLimitNoDiskUseAllowed, bad $sort key.
const SORT_REJECTION_CODES: [i32; 4] = [2, 96, 292, 15974];

/// `DocumentStore` backed by a MongoDB database.
#[derive(Clone)]
pub struct MongoStore {
    database: Database,
}

impl MongoStore {
    /// Builds the client. The driver connects in the background, so an
    /// unreachable server only shows up on the first query.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, MongoError> {
        let client = Client::with_uri_str(&config.url).await.map_err(|e| {
            error!("Failed to create MongoDB client: {}", e);
            e
        })?;

        info!("MongoDB client created for database '{}'", config.name);
        Ok(Self {
            database: client.database(&config.name),
        })
    }
}

impl DocumentStore for MongoStore {
    fn name(&self) -> &str {
        self.database.name()
    }

    fn list_collection_names(&self) -> BoxFuture<'_, Result<Vec<String>, StoreError>> {
        async move {
            let names = self.database.list_collection_names(None).await?;
            Ok(names)
        }
        .boxed()
    }

    fn count_documents<'a>(&'a self, collection: &'a str) -> BoxFuture<'a, Result<u64, StoreError>> {
        async move {
            let count = self
                .database
                .collection::<Document>(collection)
                .count_documents(doc! {}, None)
                .await?;
            debug!("Counted {} documents in '{}'", count, collection);
            Ok(count)
        }
        .boxed()
    }

    fn find<'a>(
        &'a self,
        collection: &'a str,
        spec: FindSpec,
    ) -> BoxFuture<'a, Result<Vec<Document>, StoreError>> {
        async move {
            let options = FindOptions::builder()
                .sort(spec.sort)
                .limit(spec.limit)
                .build();

            let cursor = self
                .database
                .collection::<Document>(collection)
                .find(doc! {}, options)
                .await?;
            let documents: Vec<Document> = cursor.try_collect().await?;
            Ok(documents)
        }
        .boxed()
    }
}

impl From<MongoError> for StoreError {
    fn from(err: MongoError) -> Self {
        match err.kind.as_ref() {
            ErrorKind::Command(command) if SORT_REJECTION_CODES.contains(&command.code) => {
                StoreError::SortRejected(err.to_string())
            }
            _ => StoreError::Query(err.to_string()),
        }
    }
}
