//! CRUD walkthrough against a live server
//!
//! Run this example with:
//! ```
//! AAC_MONGO_USERNAME=aacuser AAC_MONGO_PASSWORD=secret \
//!     cargo run -p aac-mongodb --example crud_walkthrough
//! ```

use aac_mongodb::{doc, CrudClient, DocumentStore, StoreConfig};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init()
        .ok();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = StoreConfig::from_env()?;
    println!("Connecting with {:?}", config);

    let client = CrudClient::connect(&config).await?;
    client.connection().ping().await?;

    println!("1. Insert");
    let inserted = client
        .insert_document("animals", &doc! { "name": "Rex", "species": "dog" })
        .await?;
    println!("   acknowledged = {}", inserted);

    println!("2. Find");
    for animal in client.find_documents("animals", &doc! { "species": "dog" }).await? {
        println!("   {}", animal);
    }

    println!("3. Update");
    let modified = client
        .update_documents("animals", &doc! { "name": "Rex" }, &doc! { "species": "canine" }, false)
        .await?;
    println!("   modified = {}", modified);

    println!("4. Delete");
    let deleted = client
        .delete_documents("animals", &doc! { "name": "Rex" }, false)
        .await?;
    println!("   deleted = {}", deleted);

    // Legacy behavior: failures are logged and collapse to neutral values
    let store = client.lenient();
    let remaining = store.find_documents("animals", &doc! { "name": "Rex" }).await;
    println!("5. Remaining Rex documents: {}", remaining.len());

    store.into_inner().close().await;
    Ok(())
}
