//! MongoDB CRUD client for aac
//!
//! A thin pass-through over the MongoDB driver: every operation selects a
//! collection and makes exactly one driver call.
//!
//! # Features
//! - Strict client returning `Result` for every operation ([`CrudClient`])
//! - Legacy adapter that logs failures and returns neutral values ([`Lenient`])
//! - Owned connection with explicit close ([`Connection`])
//! - Config from code, JSON or `AAC_MONGO_*` environment variables ([`StoreConfig`])
//!
//! # Example
//!
//! ```ignore
//! use aac_mongodb::{doc, CrudClient, DocumentStore, StoreConfig};
//!
//! let client = CrudClient::connect(&StoreConfig::new("aacuser", "secret")).await?;
//! client.insert_document("animals", &doc! { "name": "Rex", "species": "dog" }).await?;
//! let dogs = client.find_documents("animals", &doc! { "species": "dog" }).await?;
//! client.close().await;
//! ```

pub mod config;
pub mod connection;
pub mod crud;
pub mod lenient;
pub mod store;

pub use aac_common::{Result, StoreError};
pub use bson::{doc, Bson, Document};
pub use config::StoreConfig;
pub use connection::Connection;
pub use crud::CrudClient;
pub use lenient::Lenient;
pub use store::DocumentStore;
