// src/main.rs
use models::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod aggregate;
mod config;
mod crawler;
mod delivery;
mod models;
mod targets;

use config::{load_config, Config};
use crawler::{CrawlOutcome, TargetCrawler};
use delivery::{DeliveryConfig, ResultMailer};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let config = match load_config("config.yml").await {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config.yml: {}. Using defaults.", e);
            Config::default()
        }
    };

    // Setup logging
    std::env::set_var(
        "RUST_LOG",
        format!("sponsor_scraper={},chromiumoxide=warn", config.logging.level),
    );
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Fatal preconditions are checked before the browser is acquired.
    if let Some(parent) = std::path::Path::new(&config.output.path).parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            format!(
                "cannot create output directory {}: {}",
                parent.display(),
                e
            )
        })?;
    }

    let targets = targets::load_targets(&config.targets.path).await?;
    info!(
        "Loaded {} targets from {}",
        targets.len(),
        config.targets.path
    );

    let crawler = TargetCrawler::launch(config.crawl.clone()).await?;
    let outcomes = crawler.crawl_all(&targets).await;
    crawler.close().await;

    let failures: Vec<_> = outcomes
        .iter()
        .filter_map(|outcome| match outcome {
            CrawlOutcome::Failed { brand, reason } => Some((brand.as_str(), reason)),
            CrawlOutcome::Harvested { .. } => None,
        })
        .collect();
    if !failures.is_empty() {
        println!("\n❌ Failed targets ({}):", failures.len());
        for (brand, reason) in &failures {
            println!("  • {}: {}", brand, reason);
        }
    }

    let findings = outcomes.into_iter().flat_map(|outcome| match outcome {
        CrawlOutcome::Harvested { findings } => findings,
        CrawlOutcome::Failed { .. } => Vec::new(),
    });
    let table = aggregate::aggregate(findings);

    aggregate::export_to_csv(&table, &config.output.path).await?;
    println!(
        "💾 Saved {} unique emails → {}",
        table.len(),
        config.output.path
    );

    match DeliveryConfig::from_env() {
        Some(delivery) => {
            let recipient = delivery.recipient.clone();
            ResultMailer::new(delivery)
                .send_results(&config.output.path, table.len())
                .await?;
            println!("📧 Emailed results to {}", recipient);
        }
        None => {
            println!("📭 SMTP settings not set; skipped emailing. (Results saved locally)");
        }
    }

    Ok(())
}
