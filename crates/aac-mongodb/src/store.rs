//! The document store seam
//!
//! [`DocumentStore`] is the strict CRUD contract: every failure comes back as
//! an `Err`. [`crate::CrudClient`] implements it against MongoDB and
//! [`crate::Lenient`] wraps any implementation to restore the collapse-to-neutral
//! behavior.

use aac_common::{Result, StoreError};
use async_trait::async_trait;
use bson::{Bson, Document};
use serde::Serialize;

/// CRUD operations against named collections of one database
///
/// Filters, documents and update specifications are borrowed and never
/// mutated. Matching, ordering and counting semantics are those of the
/// backing store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert one document
    ///
    /// Returns true if the store acknowledged the write.
    async fn insert_document(&self, collection: &str, document: &Document) -> Result<bool>;

    /// Find all documents matching `filter`, in the order the store yields them
    async fn find_documents(&self, collection: &str, filter: &Document) -> Result<Vec<Document>>;

    /// Merge `new_values` into the first match, or into every match when `many`
    ///
    /// Returns the number of documents actually modified. A match that already
    /// holds the new values is not counted.
    async fn update_documents(
        &self,
        collection: &str,
        filter: &Document,
        new_values: &Document,
        many: bool,
    ) -> Result<u64>;

    /// Remove the first match, or every match when `many`
    ///
    /// Returns the number of documents removed.
    async fn delete_documents(&self, collection: &str, filter: &Document, many: bool) -> Result<u64>;

    /// Insert an arbitrary BSON value, rejecting anything that is not a document
    async fn insert_value(&self, collection: &str, value: Bson) -> Result<bool> {
        match value {
            Bson::Document(document) => self.insert_document(collection, &document).await,
            other => Err(StoreError::InvalidDocument(format!(
                "expected a document, got {:?}",
                other.element_type()
            ))),
        }
    }

    /// Serialize a Rust value to BSON and insert it if it is a document
    async fn insert_serialized<T>(&self, collection: &str, value: &T) -> Result<bool>
    where
        T: Serialize + Sync + ?Sized,
        Self: Sized,
    {
        let bson = bson::to_bson(value)?;
        self.insert_value(collection, bson).await
    }
}
