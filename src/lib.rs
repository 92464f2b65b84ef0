use scraper::Html;
use std::path::Path;
use tracing::{debug, error, info, warn};

pub mod game8;

mod config;
mod error;
mod fetch;
mod report;
mod utils;

pub use config::CrawlConfig;
pub use error::CrawlerError;
pub use fetch::HttpFetcher;
pub use report::{Report, HEADERS, SHEET_NAME};

use game8::{QuestLink, QuestRecord, Region, RewardEntry};

/// What a single quest page holds, keyed by the quest name from its title.
#[derive(Debug, PartialEq, Eq)]
pub enum CrawlerResult {
    Rewards(String, Vec<RewardEntry>),
    Chained(String, Vec<QuestLink>),
    Nothing(String),
}

pub trait Crawler {
    fn quest_name(&self, doc: &Html) -> String;
    fn extract_rewards(&self, doc: &Html) -> Vec<RewardEntry>;
    fn extract_nested_quests(&self, doc: &Html) -> Vec<QuestLink>;
    /// `None` when the region container is absent from the archive page.
    fn extract_regions(&self, doc: &Html) -> Option<Vec<Region>>;

    /// Rewards win over nested links; nested links are only looked up when a
    /// page has no rewards of its own.
    fn crawl(&self, doc: &Html) -> CrawlerResult {
        let name = self.quest_name(doc);

        let rewards = self.extract_rewards(doc);
        if !rewards.is_empty() {
            return CrawlerResult::Rewards(name, rewards);
        }

        let links = self.extract_nested_quests(doc);
        if !links.is_empty() {
            return CrawlerResult::Chained(name, links);
        }

        CrawlerResult::Nothing(name)
    }
}

#[async_trait::async_trait]
pub trait Fetcher {
    async fn fetch(&self, url: &str) -> Result<String, CrawlerError>;
}

/// Walks every region table of the archive page and pushes one row per quest
/// (plus sub-quest rows for chained quests) into `report`.
///
/// A failing quest page is logged and skipped. An unreachable archive or a
/// missing container aborts the crawl after a snapshot is written to
/// `config.snapshot`; rows pushed so far stay in `report`.
pub async fn run_crawler<C, F>(
    crawler: &C,
    fetcher: &F,
    config: &CrawlConfig,
    report: &mut Report,
) -> Result<(), CrawlerError>
where
    C: Crawler,
    F: Fetcher,
{
    info!("Fetching {}", config.archive_url);
    let html = match fetcher.fetch(&config.archive_url).await {
        Ok(html) => html,
        Err(e) => {
            error!("Cannot fetch archive page: {}", e);
            let stub = format!(
                "<!-- {} could not be fetched: {} -->\n",
                config.archive_url, e
            );
            save_snapshot(&config.snapshot, &stub).await;
            return Err(e);
        }
    };

    info!("Searching for the quest information container...");
    let regions = {
        let doc = Html::parse_document(&html);
        crawler.extract_regions(&doc)
    };

    let Some(regions) = regions else {
        error!("Container {} not found", config.container_selector);
        save_snapshot(&config.snapshot, &html).await;
        return Err(CrawlerError::ContainerNotFound(
            config.container_selector.clone(),
        ));
    };

    info!("Found {} tables with world quests", regions.len());
    for (table_index, region) in regions.iter().enumerate() {
        info!("Processing table {}", table_index + 1);
        info!("Region: {}", region.name);
        info!("Found {} quest links", region.quests.len());

        let total = region.quests.len();
        for (i, link) in region.quests.iter().enumerate() {
            if !utils::is_http_url(&link.url) {
                warn!("Skipping invalid URL: {}", link.url);
                continue;
            }

            info!(
                "Visiting link {}/{} for {}: {}",
                i + 1,
                total,
                region.name,
                link.url
            );
            if let Err(e) = visit_quest(crawler, fetcher, &region.name, link, report).await {
                warn!(
                    "Error loading page or extracting info for {} ({}): {}",
                    link.url, region.name, e
                );
                continue;
            }

            tokio::time::sleep(config.request_delay()).await;
        }
    }

    info!(
        "Crawled {} regions into {} rows",
        regions.len(),
        report.len()
    );
    Ok(())
}

/// A snapshot that cannot be written is only logged; the abort reason wins.
async fn save_snapshot(path: &Path, content: &str) {
    match tokio::fs::write(path, content).await {
        Ok(()) => error!("Snapshot saved as {}", path.display()),
        Err(e) => error!("Cannot save snapshot {}: {}", path.display(), e),
    }
}

async fn visit_quest<C, F>(
    crawler: &C,
    fetcher: &F,
    region: &str,
    link: &QuestLink,
    report: &mut Report,
) -> Result<(), CrawlerError>
where
    C: Crawler,
    F: Fetcher,
{
    let html = fetcher.fetch(&link.url).await?;
    let result = {
        let doc = Html::parse_document(&html);
        crawler.crawl(&doc)
    };

    match result {
        CrawlerResult::Rewards(name, rewards) => {
            info!("Quest Name: {}", name);
            report.push(QuestRecord::quest(region, &name, rewards));
        }
        CrawlerResult::Chained(name, links) => {
            info!("Quest Name: {} (chained, {} sub-quests)", name, links.len());
            report.push(QuestRecord::chained(region, &name));
            for nested in &links {
                if let Err(e) = visit_sub_quest(crawler, fetcher, nested, report).await {
                    warn!(
                        "Error loading sub-quest {} of {}: {}",
                        nested.url, name, e
                    );
                }
            }
        }
        CrawlerResult::Nothing(name) => {
            info!("No rewards or nested quests found for {}", name);
        }
    }
    Ok(())
}

/// Sub-quest rows are named after the link that led to them.
async fn visit_sub_quest<C, F>(
    crawler: &C,
    fetcher: &F,
    link: &QuestLink,
    report: &mut Report,
) -> Result<(), CrawlerError>
where
    C: Crawler,
    F: Fetcher,
{
    debug!("Visiting sub-quest {}: {}", link.name, link.url);
    let html = fetcher.fetch(&link.url).await?;
    let result = {
        let doc = Html::parse_document(&html);
        crawler.crawl(&doc)
    };

    match result {
        CrawlerResult::Rewards(_, rewards) => {
            report.push(QuestRecord::sub_quest(&link.name, rewards));
        }
        // TODO: follow chained sub-quests once a page nesting three levels deep shows up
        CrawlerResult::Chained(name, links) => {
            warn!(
                "Sub-quest {} links {} further quests, not followed",
                name,
                links.len()
            );
        }
        CrawlerResult::Nothing(name) => {
            debug!("No rewards found for sub-quest {}", name);
        }
    }
    Ok(())
}
