//! MongoDB connection ownership and health checking

use crate::config::StoreConfig;
use aac_common::{Result, StoreError};
use bson::{doc, Document};
use mongodb::{options::ClientOptions, Client, Collection, Database};
use tracing::{info, instrument};

/// An open client bound to one working database
///
/// Acquired with [`Connection::open`] and released with [`Connection::close`].
/// The driver connects lazily, so an unreachable server surfaces on the
/// first operation rather than here.
///
/// The connection is owned by exactly one holder and cannot be duplicated,
/// so closing it never shuts down a client someone else is still using.
/// Share it by reference instead.
///
/// ```compile_fail
/// fn duplicate(conn: &aac_mongodb::Connection) -> aac_mongodb::Connection {
///     conn.clone()
/// }
/// ```
#[derive(Debug)]
pub struct Connection {
    client: Client,
    database: Database,
}

impl Connection {
    /// Parse the config's URI, apply driver options and bind the database
    #[instrument(skip(config), fields(host = %config.host, port = config.port, database = %config.database_name))]
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        let uri = config.connection_uri();
        let mut client_options = ClientOptions::parse(uri.as_str())
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        if let Some(app) = &config.app_name {
            client_options.app_name = Some(app.clone());
        }
        if let Some(connect) = config.connect_timeout() {
            client_options.connect_timeout = Some(connect);
        }
        if let Some(server_sel) = config.server_selection_timeout() {
            client_options.server_selection_timeout = Some(server_sel);
        }
        if let Some(write_concern) = &config.write_concern {
            client_options.write_concern = Some(write_concern.clone());
        }

        let client = Client::with_options(client_options)
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        let database = client.database(&config.database_name);

        info!("Opened document store connection");

        Ok(Self { client, database })
    }

    /// Get a reference to the database
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Get the database name
    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    /// Get a collection by name; resolved on every call, never cached
    pub fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection(name)
    }

    /// Check if the server answers a ping
    pub async fn ping(&self) -> Result<()> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| StoreError::Connection(format!("Ping failed: {}", e)))?;
        Ok(())
    }

    /// Release the client and wait for the driver's background tasks to stop
    pub async fn close(self) {
        let Self { client, database } = self;
        let database_name = database.name().to_string();
        drop(database);
        client.shutdown().await;
        info!(database = %database_name, "Closed document store connection");
    }
}
