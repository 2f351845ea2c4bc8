//! Quickstart Example
//!
//! Create an index, add a few documents, wait for the tasks and search.
//!
//! Run with: cargo run --example quickstart
//!
//! Expects a Strata instance on http://localhost:7700 (set STRATA_URL and
//! STRATA_API_KEY to override).

use serde::{Deserialize, Serialize};
use strata_rs::{Client, SearchQuery};

#[derive(Debug, Serialize, Deserialize)]
struct Movie {
    id: u32,
    title: String,
    genre: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let url = std::env::var("STRATA_URL").unwrap_or_else(|_| "http://localhost:7700".to_string());
    let api_key = std::env::var("STRATA_API_KEY").ok();
    let client = Client::new(url, api_key);

    // Enqueue index creation and block until the task finishes
    let task = client.create_index("movies", Some("id")).await?;
    client.wait_for_task(&task, None, None).await?;
    println!("Index created (task {})", task.task_uid);

    let movies = vec![
        Movie {
            id: 1,
            title: "The Matrix".to_string(),
            genre: "sci-fi".to_string(),
        },
        Movie {
            id: 2,
            title: "Carol".to_string(),
            genre: "drama".to_string(),
        },
        Movie {
            id: 3,
            title: "Mad Max: Fury Road".to_string(),
            genre: "action".to_string(),
        },
    ];

    let index = client.index("movies");
    let task = index.add_documents(&movies, None).await?;
    let finished = client.wait_for_task(&task, None, None).await?;
    println!("Ingestion finished with status {:?}", finished.status);

    // Search
    let query = SearchQuery {
        q: Some("matrix".to_string()),
        limit: Some(5),
        ..Default::default()
    };
    let results = index.search::<Movie>(&query).await?;
    println!(
        "Found {} hit(s) in {} ms:",
        results.hit_count().unwrap_or(0),
        results.processing_time_ms
    );
    for hit in &results.hits {
        println!("  {} ({})", hit.title, hit.genre);
    }

    Ok(())
}
