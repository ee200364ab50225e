//! Legacy error-collapsing adapter
//!
//! [`Lenient`] never returns an error. A failed operation is logged at
//! `error` level with its name and cause, and the caller receives the
//! operation's neutral value: `false`, `0`, or an empty list. Callers cannot
//! tell "nothing matched" from "the store failed" without the log.

use crate::store::DocumentStore;
use aac_common::Result;
use bson::{Bson, Document};
use serde::Serialize;
use tracing::error;

/// Wraps a [`DocumentStore`] and swaps every `Err` for a neutral value
#[derive(Debug, Clone)]
pub struct Lenient<S> {
    store: S,
}

fn neutral<T: Default>(operation: &'static str, collection: &str, result: Result<T>) -> T {
    result.unwrap_or_else(|err| {
        error!(operation, collection, error = %err, "[{}] Error: {}", operation, err);
        T::default()
    })
}

impl<S: DocumentStore> Lenient<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Returns true only for an acknowledged insert
    pub async fn insert_document(&self, collection: &str, document: &Document) -> bool {
        let result = self.store.insert_document(collection, document).await;
        neutral("insert_document", collection, result)
    }

    /// Like [`Lenient::insert_document`], but a non-document value yields false
    pub async fn insert_value(&self, collection: &str, value: Bson) -> bool {
        let result = self.store.insert_value(collection, value).await;
        neutral("insert_document", collection, result)
    }

    pub async fn insert_serialized<T>(&self, collection: &str, value: &T) -> bool
    where
        T: Serialize + Sync + ?Sized,
    {
        let result = self.store.insert_serialized(collection, value).await;
        neutral("insert_document", collection, result)
    }

    /// Empty both when nothing matches and when the query fails
    pub async fn find_documents(&self, collection: &str, filter: &Document) -> Vec<Document> {
        let result = self.store.find_documents(collection, filter).await;
        neutral("find_documents", collection, result)
    }

    pub async fn update_documents(
        &self,
        collection: &str,
        filter: &Document,
        new_values: &Document,
        many: bool,
    ) -> u64 {
        let result = self
            .store
            .update_documents(collection, filter, new_values, many)
            .await;
        neutral("update_documents", collection, result)
    }

    pub async fn delete_documents(&self, collection: &str, filter: &Document, many: bool) -> u64 {
        let result = self.store.delete_documents(collection, filter, many).await;
        neutral("delete_documents", collection, result)
    }
}
