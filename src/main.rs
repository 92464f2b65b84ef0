use clap::Parser;
use genshin_quest_crawler::{
    game8::Game8Crawler, run_crawler, CrawlConfig, HttpFetcher, Report,
};
use tracing::{error, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let config = CrawlConfig::parse();
    let crawler = Game8Crawler::new(&config)?;
    let fetcher = HttpFetcher::new(&config)?;

    let mut report = Report::new();
    let outcome = run_crawler(&crawler, &fetcher, &config, &mut report).await;
    if let Err(e) = &outcome {
        error!("An error occurred: {}", e);
    }

    // Partial results are kept even when the crawl was aborted.
    report.save(&config.output)?;
    if let Some(csv) = &config.csv {
        report.save_csv(csv)?;
    }
    outcome?;

    info!("Scraping completed.");
    Ok(())
}
