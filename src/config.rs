use clap::Parser;
use std::path::PathBuf;
use tokio::time::Duration;

const ARCHIVE_URL: &str = "https://game8.co/games/Genshin-Impact/archives/297433";
const CONTAINER_SELECTOR: &str = "body > div.l-content > div.l-3col > div.l-3colMain > div.l-3colMain__center.l-3colMain__center--shadow > div.archive-style-wrapper";

/// Crawl Genshin Impact world quest rewards from Game8 into a spreadsheet.
#[derive(Debug, Clone, Parser)]
#[command(version)]
pub struct CrawlConfig {
    /// Archive page listing every region table
    #[arg(long, default_value = ARCHIVE_URL)]
    pub archive_url: String,

    /// Element holding all region tables on the archive page
    #[arg(long, default_value = CONTAINER_SELECTOR)]
    pub container_selector: String,

    #[arg(long, default_value = "genshin_impact_world_quests_rewards.xlsx")]
    pub output: PathBuf,

    /// Also write the rows as CSV to this path
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Archive markup (or the fetch error) is dumped here when the crawl aborts
    #[arg(long, default_value = "error_snapshot.html")]
    pub snapshot: PathBuf,

    /// Pause after every top-level quest page
    #[arg(long, default_value_t = 1000)]
    pub delay_ms: u64,

    /// Per-request HTTP timeout
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    #[arg(long)]
    pub user_agent: Option<String>,
}

impl CrawlConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        CrawlConfig::parse_from([env!("CARGO_PKG_NAME")])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_the_game8_archive() {
        let config = CrawlConfig::default();
        assert_eq!(config.archive_url, ARCHIVE_URL);
        assert_eq!(config.container_selector, CONTAINER_SELECTOR);
        assert_eq!(
            config.output,
            PathBuf::from("genshin_impact_world_quests_rewards.xlsx")
        );
        assert_eq!(config.request_delay(), Duration::from_secs(1));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.csv, None);
        assert_eq!(config.user_agent, None);
    }

    #[test]
    fn flags_override_defaults() {
        let config = CrawlConfig::parse_from([
            "genshin-quest-crawler",
            "--delay-ms",
            "0",
            "--output",
            "out.xlsx",
            "--user-agent",
            "Mozilla/5.0",
            "--csv",
            "out.csv",
        ]);
        assert_eq!(config.request_delay(), Duration::ZERO);
        assert_eq!(config.output, PathBuf::from("out.xlsx"));
        assert_eq!(config.user_agent.as_deref(), Some("Mozilla/5.0"));
        assert_eq!(config.csv, Some(PathBuf::from("out.csv")));
    }
}
