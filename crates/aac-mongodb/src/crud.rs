//! MongoDB-backed CRUD client
//!
//! Each operation resolves the collection, forwards the caller's documents to
//! a single driver call, and returns the driver's answer. Nothing is cached
//! and nothing is retried.

use crate::config::StoreConfig;
use crate::connection::Connection;
use crate::lenient::Lenient;
use crate::store::DocumentStore;
use aac_common::Result;
use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::options::{Acknowledgment, WriteConcern};
use tracing::{debug, instrument};

/// Strict document store client over one MongoDB database
///
/// Owns its [`Connection`] exclusively; concurrent callers share `&CrudClient`.
///
/// ```compile_fail
/// fn duplicate(client: &aac_mongodb::CrudClient) -> aac_mongodb::CrudClient {
///     client.clone()
/// }
/// ```
#[derive(Debug)]
pub struct CrudClient {
    connection: Connection,
}

impl CrudClient {
    /// Open a connection described by `config`
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        Ok(Self::from_connection(Connection::open(config).await?))
    }

    /// Open a connection with default database, host, port and auth source
    pub async fn with_credentials(username: &str, password: &str) -> Result<Self> {
        Self::connect(&StoreConfig::new(username, password)).await
    }

    pub fn from_connection(connection: Connection) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Wrap this client in the adapter that logs failures and returns neutral values
    pub fn lenient(self) -> Lenient<Self> {
        Lenient::new(self)
    }

    pub async fn close(self) {
        self.connection.close().await;
    }
}

/// A write is acknowledged unless the effective write concern asks for zero nodes
fn is_acknowledged(write_concern: Option<&WriteConcern>) -> bool {
    !matches!(
        write_concern.and_then(|wc| wc.w.as_ref()),
        Some(Acknowledgment::Nodes(0))
    )
}

#[async_trait]
impl DocumentStore for CrudClient {
    #[instrument(skip_all, fields(collection = %collection))]
    async fn insert_document(&self, collection: &str, document: &Document) -> Result<bool> {
        let coll = self.connection.collection(collection);

        let result = coll.insert_one(document).await?;
        let acknowledged = is_acknowledged(coll.write_concern());

        debug!(inserted_id = %result.inserted_id, acknowledged, "Inserted document");
        Ok(acknowledged)
    }

    #[instrument(skip_all, fields(collection = %collection))]
    async fn find_documents(&self, collection: &str, filter: &Document) -> Result<Vec<Document>> {
        let coll = self.connection.collection(collection);

        let cursor = coll.find(filter.clone()).await?;
        let docs: Vec<Document> = cursor.try_collect().await?;

        debug!(count = docs.len(), "Found documents");
        Ok(docs)
    }

    #[instrument(skip_all, fields(collection = %collection, many = many))]
    async fn update_documents(
        &self,
        collection: &str,
        filter: &Document,
        new_values: &Document,
        many: bool,
    ) -> Result<u64> {
        let coll = self.connection.collection(collection);
        let update = doc! { "$set": new_values.clone() };

        let result = if many {
            coll.update_many(filter.clone(), update).await?
        } else {
            coll.update_one(filter.clone(), update).await?
        };

        debug!(
            matched = result.matched_count,
            modified = result.modified_count,
            "Updated documents"
        );
        Ok(result.modified_count)
    }

    #[instrument(skip_all, fields(collection = %collection, many = many))]
    async fn delete_documents(&self, collection: &str, filter: &Document, many: bool) -> Result<u64> {
        let coll = self.connection.collection(collection);

        let result = if many {
            coll.delete_many(filter.clone()).await?
        } else {
            coll.delete_one(filter.clone()).await?
        };

        debug!(deleted = result.deleted_count, "Deleted documents");
        Ok(result.deleted_count)
    }
}
