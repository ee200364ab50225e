//! Integration tests for CRUD operations.
//!
//! These tests require a MongoDB server to be running.
//! Configure it with the AAC_MONGO_* environment variables and run with --ignored.

use aac_mongodb::{doc, CrudClient, Document, DocumentStore, StoreConfig};
use mongodb::options::{Acknowledgment, WriteConcern};
use std::time::Duration;

const TEST_DATABASE: &str = "aac_test";

fn test_config() -> StoreConfig {
    StoreConfig::from_env()
        .unwrap_or_else(|_| StoreConfig::new("aacuser", "aacuser"))
        .with_database(TEST_DATABASE)
}

async fn connect() -> CrudClient {
    let config = test_config();

    let client = CrudClient::connect(&config).await.unwrap();
    client.connection().ping().await.unwrap();
    client
}

/// Each test owns one collection, emptied before use
async fn fresh_collection(client: &CrudClient, name: &str) -> String {
    client.connection().collection(name).drop().await.unwrap();
    name.to_string()
}

async fn seed(client: &CrudClient, collection: &str, docs: &[Document]) {
    for d in docs {
        assert!(client.insert_document(collection, d).await.unwrap());
    }
}

#[tokio::test]
#[ignore] // Only run with --ignored flag when database is available
async fn test_insert_then_find_by_fields() -> Result<(), Box<dyn std::error::Error>> {
    let client = connect().await;
    let coll = fresh_collection(&client, "test_insert_then_find").await;

    let animal = doc! {
        "name": "Bella",
        "breed": "Labrador Retriever Mix",
        "age_upon_outcome_in_weeks": 52.9,
        "location": { "lat": 30.75, "long": -97.48 },
        "tags": ["rescue", "water"],
    };
    let before = animal.clone();

    assert!(client.insert_document(&coll, &animal).await?);
    // The caller's document is not given an _id
    assert_eq!(animal, before);

    let found = client.find_documents(&coll, &doc! { "name": "Bella" }).await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].get_str("breed")?, "Labrador Retriever Mix");
    assert_eq!(found[0].get_document("location")?.get_f64("lat")?, 30.75);
    assert!(found[0].get_object_id("_id").is_ok());

    client.close().await;
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_find_empty_filter_returns_everything() -> Result<(), Box<dyn std::error::Error>> {
    let client = connect().await;
    let coll = fresh_collection(&client, "test_find_all").await;

    seed(
        &client,
        &coll,
        &[
            doc! { "name": "Rex", "species": "dog" },
            doc! { "name": "Tom", "species": "cat" },
            doc! { "name": "Tweety", "species": "bird" },
        ],
    )
    .await;

    let all = client.find_documents(&coll, &doc! {}).await?;
    assert_eq!(all.len(), 3);

    let none = client.find_documents(&coll, &doc! { "species": "horse" }).await?;
    assert!(none.is_empty());

    let lenient = client.lenient();
    assert!(lenient.find_documents(&coll, &doc! { "species": "horse" }).await.is_empty());

    lenient.into_inner().close().await;
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_find_with_operator_filter() -> Result<(), Box<dyn std::error::Error>> {
    let client = connect().await;
    let coll = fresh_collection(&client, "test_find_operator").await;

    seed(
        &client,
        &coll,
        &[
            doc! { "name": "Pup", "age_upon_outcome_in_weeks": 10 },
            doc! { "name": "Old", "age_upon_outcome_in_weeks": 400 },
        ],
    )
    .await;

    let young = client
        .find_documents(&coll, &doc! { "age_upon_outcome_in_weeks": { "$lt": 26 } })
        .await?;
    assert_eq!(young.len(), 1);
    assert_eq!(young[0].get_str("name")?, "Pup");

    client.close().await;
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_update_one_versus_many() -> Result<(), Box<dyn std::error::Error>> {
    let client = connect().await;
    let coll = fresh_collection(&client, "test_update_counts").await;

    seed(
        &client,
        &coll,
        &[
            doc! { "species": "dog", "status": "intake" },
            doc! { "species": "dog", "status": "intake" },
            doc! { "species": "dog", "status": "intake" },
        ],
    )
    .await;

    let filter = doc! { "species": "dog" };

    let modified = client
        .update_documents(&coll, &filter, &doc! { "status": "adopted" }, false)
        .await?;
    assert_eq!(modified, 1);

    let modified = client
        .update_documents(&coll, &filter, &doc! { "status": "adopted" }, true)
        .await?;
    // One of the three already holds the value
    assert_eq!(modified, 2);

    let modified = client
        .update_documents(&coll, &filter, &doc! { "status": "adopted" }, true)
        .await?;
    assert_eq!(modified, 0);

    // Partial update leaves other fields alone
    let dogs = client.find_documents(&coll, &filter).await?;
    assert!(dogs.iter().all(|d| d.get_str("species").ok() == Some("dog")));

    client.close().await;
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_delete_one_versus_many() -> Result<(), Box<dyn std::error::Error>> {
    let client = connect().await;
    let coll = fresh_collection(&client, "test_delete_counts").await;

    seed(
        &client,
        &coll,
        &[
            doc! { "species": "cat" },
            doc! { "species": "cat" },
            doc! { "species": "cat" },
            doc! { "species": "dog" },
        ],
    )
    .await;

    let cats = doc! { "species": "cat" };

    assert_eq!(client.delete_documents(&coll, &cats, false).await?, 1);
    assert_eq!(client.delete_documents(&coll, &cats, true).await?, 2);
    assert_eq!(client.delete_documents(&coll, &cats, true).await?, 0);
    assert_eq!(client.find_documents(&coll, &doc! {}).await?.len(), 1);

    client.close().await;
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_rex_lifecycle() -> Result<(), Box<dyn std::error::Error>> {
    let client = connect().await;
    let coll = fresh_collection(&client, "animals").await;
    let store = client.lenient();

    assert!(store.insert_document(&coll, &doc! { "name": "Rex", "species": "dog" }).await);

    let dogs = store.find_documents(&coll, &doc! { "species": "dog" }).await;
    assert_eq!(dogs.len(), 1);
    assert_eq!(dogs[0].get_str("name")?, "Rex");
    assert_eq!(dogs[0].get_str("species")?, "dog");

    assert_eq!(
        store
            .update_documents(&coll, &doc! { "name": "Rex" }, &doc! { "species": "canine" }, false)
            .await,
        1
    );
    assert_eq!(store.delete_documents(&coll, &doc! { "name": "Rex" }, false).await, 1);
    assert!(store.find_documents(&coll, &doc! { "name": "Rex" }).await.is_empty());

    store.into_inner().close().await;
    Ok(())
}

#[tokio::test]
#[ignore]
async fn test_unacknowledged_insert_returns_false() -> Result<(), Box<dyn std::error::Error>> {
    let client = connect().await;
    let coll = fresh_collection(&client, "test_unacknowledged_insert").await;

    let config = test_config()
        .with_write_concern(WriteConcern::builder().w(Acknowledgment::Nodes(0)).build());
    let fire_and_forget = CrudClient::connect(&config).await?;

    let acknowledged = fire_and_forget
        .insert_document(&coll, &doc! { "name": "Milo", "species": "cat" })
        .await?;
    assert!(!acknowledged);

    // The write is not confirmed, so poll through the acknowledged client
    let mut found = Vec::new();
    for _ in 0..50 {
        found = client.find_documents(&coll, &doc! { "name": "Milo" }).await?;
        if !found.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].get_str("species")?, "cat");

    fire_and_forget.close().await;
    client.close().await;
    Ok(())
}
