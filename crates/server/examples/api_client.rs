//! Walk through the Vibe Matcher HTTP API against a running server.
//!
//! ```text
//! cargo run -p vibematcher-server &
//! cargo run -p vibematcher-server --example api_client
//! ```

use reqwest::Client;
use serde_json::json;

const SERVER_URL: &str = "http://localhost:8080";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let client = Client::new();

    println!("1. Readiness:");
    let resp = client.get(format!("{SERVER_URL}/ready")).send().await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("2. Catalog:");
    let resp = client
        .get(format!("{SERVER_URL}/api/v1/catalog"))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    for (i, vibe) in [
        "energetic urban chic",
        "cozy rainy day book",
        "futuristic cyberpunk",
    ]
    .iter()
    .enumerate()
    {
        println!("{}. Match '{vibe}':", i + 3);
        let resp = client
            .post(format!("{SERVER_URL}/api/v1/match"))
            .json(&json!({ "query": vibe, "top_n": 3 }))
            .send()
            .await?;
        println!("Status: {}", resp.status());
        let body: serde_json::Value = resp.json().await?;
        match body["screen"].as_str() {
            Some(screen) => println!("{screen}"),
            None => println!("Body: {body}"),
        }
        println!();
    }

    println!("6. Empty vibe (expect 400):");
    let resp = client
        .post(format!("{SERVER_URL}/api/v1/match"))
        .json(&json!({ "query": "   " }))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    println!("Body: {}", resp.text().await?);
    println!();

    println!("7. Smoke run:");
    let resp = client
        .post(format!("{SERVER_URL}/api/v1/smoke"))
        .send()
        .await?;
    println!("Status: {}", resp.status());
    let body: serde_json::Value = resp.json().await?;
    match body["table"].as_str() {
        Some(table) => println!("{table}"),
        None => println!("Body: {body}"),
    }

    Ok(())
}
