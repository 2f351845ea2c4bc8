//! Batch Ingestion Example
//!
//! Ingest a CSV payload in fixed-size batches and tune index settings.
//!
//! Run with: cargo run --example batch_ingest

use strata_rs::{Client, Settings};

const CSV: &str = "\
id,title,genre
1,The Matrix,sci-fi
2,Carol,drama
3,Life of Pi,adventure
4,Mad Max,action
5,Moana,animation
";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let url = std::env::var("STRATA_URL").unwrap_or_else(|_| "http://localhost:7700".to_string());
    let client = Client::new(url, std::env::var("STRATA_API_KEY").ok());

    let task = client.create_index("movies", Some("id")).await?;
    client.wait_for_task(&task, None, None).await?;

    let index = client.index("movies");

    // One request per two data rows; each chunk re-sends the header
    let tasks = index
        .add_documents_csv_in_batches(CSV, 2, None, None)
        .await?;
    println!("Enqueued {} ingestion task(s)", tasks.len());
    for task in &tasks {
        let finished = client.wait_for_task(task, None, None).await?;
        println!("  task {} -> {:?}", finished.uid, finished.status);
    }

    // Make genre filterable and drop common stop words
    let settings = Settings {
        filterable_attributes: Some(vec!["genre".to_string()]),
        stop_words: Some(vec!["the".to_string(), "of".to_string()]),
        ..Default::default()
    };
    let task = index.update_settings(&settings).await?;
    client.wait_for_task(&task, None, None).await?;

    let stats = index.stats().await?;
    println!("Index now holds {} document(s)", stats.number_of_documents);

    Ok(())
}
