mod crawler;
mod models;

use std::env;

use chrono::Local;
use crawler::{CrawlConfig, Crawler};
use tracing::{info, Level};

const DEFAULT_START_URL: &str =
    "https://www.metrocuadrado.com/apartamento-apartaestudio-casa-casalote/venta/bogota/?search=form";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let start_url = env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_START_URL.to_string());

    info!("🏠 Listing Scout - catalog crawler");
    info!("Starting crawl from {start_url}");

    let crawler = Crawler::new(CrawlConfig::default());

    // Ctrl-C lets the current page finish, then ends the run cleanly.
    let cancel = crawler.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received; stopping after the current page");
            cancel.cancel();
        }
    });

    let (records, summary) = crawler.run(&start_url);

    info!(
        "✅ Visited {} pages, extracted {} records",
        summary.pages_visited, summary.records_extracted
    );

    let filename = format!("listings_{}.json", Local::now().date_naive());
    let json = serde_json::to_string_pretty(&records)?;
    tokio::fs::write(&filename, json).await?;
    info!("💾 Saved {} records to {}", records.len(), filename);

    Ok(())
}
