//! # Search Example
//!
//! Searches for images, prints the hits and downloads the first preview.
//!
//! ## Usage
//!
//! ```sh
//! ASSETS_USERNAME=api ASSETS_PASSWORD=secret \
//!     cargo run --example search_assets --features "client"
//! ```

use ardea::prelude::*;
use std::env;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut config = AssetsConfig::new(
        env::var("ASSETS_URL").unwrap_or_else(|_| "http://localhost:9090".to_string()),
        env::var("ASSETS_USERNAME")?,
        env::var("ASSETS_PASSWORD")?,
    );
    // Demo servers often run with self-signed certificates.
    config.reject_unauthorized = false;

    let client = AssetsClient::new(config)?;

    let mut request = SearchRequest::new("assetType:image");
    request.num = 10;
    let results = client.search(&request).await?;

    println!("{} hits total", results.total_hits);
    for hit in &results.hits {
        let path = hit
            .metadata
            .get("assetPath")
            .and_then(|v| v.as_str())
            .unwrap_or("<no path>");
        println!("  {}  {path}", hit.id);
    }

    if let Some(first) = results.hits.first() {
        let path = client.download_preview_from_id(&first.id, None).await?;
        println!("Preview downloaded to {path:?}");
    }

    Ok(())
}
