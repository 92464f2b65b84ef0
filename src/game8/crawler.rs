use crate::{
    game8::{QuestLink, Region, RewardEntry},
    utils, CrawlConfig, Crawler, CrawlerError,
};
use lazy_static::lazy_static;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

// Reward tables share their class with unrelated tables on the same page, so
// candidates are narrowed by text. Markup changes should only touch these.
const E: &str = "Invalid selector";
lazy_static! {
    static ref TITLE: Selector = Selector::parse("title").expect(E);
    static ref REWARD_TABLE: Selector =
        Selector::parse("table.a-table, table.top, table.center").expect(E);
    static ref REWARD_TABLE_FALLBACK: Selector =
        Selector::parse("div.archive-style-wrapper > table.a-table.a-table.top.center").expect(E);
    static ref SECOND_ROW_CELL: Selector = Selector::parse("tr:nth-child(2) td").expect(E);
    static ref REWARD_LINK: Selector = Selector::parse("a.a-link").expect(E);
    static ref NESTED_QUEST_LINK: Selector =
        Selector::parse("div.archive-style-wrapper > p > a").expect(E);
    static ref REGION_TABLE: Selector = Selector::parse("table.a-table").expect(E);
    static ref REGION_HEADER: Selector = Selector::parse("th").expect(E);
    static ref QUEST_LINK: Selector =
        Selector::parse("tbody > tr > td:nth-child(1) > a").expect(E);
}

const REWARD_MARKER: &str = "reward";

#[derive(Debug)]
pub struct Game8Crawler {
    base_url: Url,
    container: Selector,
}

impl Game8Crawler {
    pub fn new(config: &CrawlConfig) -> Result<Game8Crawler, CrawlerError> {
        let base_url = Url::parse(&config.archive_url)
            .map_err(|e| CrawlerError::InvalidUrl(format!("{}: {}", config.archive_url, e)))?;
        let container = Selector::parse(&config.container_selector).map_err(|e| {
            CrawlerError::InvalidSelector(format!("{}: {:?}", config.container_selector, e))
        })?;
        Ok(Game8Crawler {
            base_url,
            container,
        })
    }

    fn resolve(&self, href: &str) -> Option<String> {
        match self.base_url.join(href.trim()) {
            Ok(url) => Some(url.to_string()),
            Err(e) => {
                warn!("Cannot resolve {}: {}", href, e);
                None
            }
        }
    }

    fn link_from_anchor(&self, a: ElementRef<'_>) -> Option<QuestLink> {
        let name = text_of(a);
        let Some(href) = a.value().attr("href") else {
            warn!("Anchor {:?} has no href", name);
            return None;
        };
        self.resolve(href).map(|url| QuestLink { name, url })
    }
}

impl Crawler for Game8Crawler {
    fn quest_name(&self, doc: &Html) -> String {
        let title = doc.select(&TITLE).next().map(|el| el.text().collect::<String>());
        utils::quest_name_from_title(title.as_deref())
    }

    fn extract_rewards(&self, doc: &Html) -> Vec<RewardEntry> {
        let tables = reward_tables(doc);
        if tables.is_empty() {
            debug!("No rewards table found");
            return vec![];
        }
        debug!("Found {} potential rewards tables", tables.len());

        tables
            .into_iter()
            .filter(|table| {
                table
                    .text()
                    .collect::<String>()
                    .to_lowercase()
                    .contains(REWARD_MARKER)
            })
            .flat_map(|table| table.select(&SECOND_ROW_CELL).collect::<Vec<_>>())
            .filter_map(reward_from_cell)
            .collect()
    }

    fn extract_nested_quests(&self, doc: &Html) -> Vec<QuestLink> {
        doc.select(&NESTED_QUEST_LINK)
            .filter_map(|a| self.link_from_anchor(a))
            .collect()
    }

    fn extract_regions(&self, doc: &Html) -> Option<Vec<Region>> {
        let container = doc.select(&self.container).next()?;

        let regions = container
            .select(&REGION_TABLE)
            .map(|table| {
                let name = match table.select(&REGION_HEADER).next() {
                    Some(th) => text_of(th),
                    None => {
                        warn!("Region table without header");
                        String::new()
                    }
                };
                let quests = table
                    .select(&QUEST_LINK)
                    .filter_map(|a| self.link_from_anchor(a))
                    .collect();
                Region { name, quests }
            })
            .collect();
        Some(regions)
    }
}

/// Candidate reward tables in document order: the combined class selector
/// first, the wrapper-scoped selector only when nothing matched.
fn reward_tables(doc: &Html) -> Vec<ElementRef<'_>> {
    let tables = doc.select(&REWARD_TABLE).collect::<Vec<_>>();
    if tables.is_empty() {
        doc.select(&REWARD_TABLE_FALLBACK).collect()
    } else {
        tables
    }
}

fn reward_from_cell(cell: ElementRef<'_>) -> Option<RewardEntry> {
    let link = cell.select(&REWARD_LINK).next()?;
    let count = cell
        .last_child()
        .and_then(|node| node.value().as_text().map(|text| utils::normalize_count(text)))
        .unwrap_or_default();

    if count.is_empty() {
        None
    } else {
        Some(RewardEntry {
            name: text_of(link),
            count,
        })
    }
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn crawler() -> Game8Crawler {
        Game8Crawler::new(&CrawlConfig::default()).expect("Invalid default config")
    }

    fn fixture(name: &str) -> Html {
        let html = fs::read_to_string(format!("tests/htmls/{}", name)).expect("Invalid file path");
        Html::parse_document(&html)
    }

    #[test]
    fn rewards_from_second_row_of_reward_tables() {
        let doc = fixture("rewards_mixed.html");
        let rewards = crawler().extract_rewards(&doc);
        assert_eq!(
            rewards,
            vec![
                RewardEntry::new("Primogem", "40"),
                RewardEntry::new("Mora", "20,000"),
                RewardEntry::new("Adventure EXP", "300"),
                RewardEntry::new("Hero's Wit", "4"),
            ]
        );
    }

    #[test]
    fn no_reward_table_means_no_rewards() {
        let doc = fixture("no_rewards.html");
        assert!(crawler().extract_rewards(&doc).is_empty());
    }

    #[test]
    fn quest_name_from_page_title() {
        assert_eq!(crawler().quest_name(&fixture("quest_mora.html")), "A Mora Quest");
        let doc = Html::parse_document("<html><body><p>untitled</p></body></html>");
        assert_eq!(crawler().quest_name(&doc), utils::NO_TITLE);
    }

    #[test]
    fn nested_quests_resolve_against_archive_url() {
        let doc = fixture("chained.html");
        let links = crawler().extract_nested_quests(&doc);
        assert_eq!(
            links,
            vec![
                QuestLink {
                    name: "Part One".to_string(),
                    url: "https://game8.co/games/Genshin-Impact/archives/310001".to_string(),
                },
                QuestLink {
                    name: "Part Two".to_string(),
                    url: "https://game8.co/games/Genshin-Impact/archives/310002".to_string(),
                },
            ]
        );
    }

    #[test]
    fn regions_in_table_order() {
        let doc = fixture("archive.html");
        let regions = crawler().extract_regions(&doc).expect("Container missing");
        let names = regions.iter().map(|r| r.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Mondstadt", "Liyue"]);

        let mondstadt = regions[0]
            .quests
            .iter()
            .map(|q| q.url.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            mondstadt,
            vec![
                "https://game8.co/games/Genshin-Impact/archives/300001",
                "javascript:void(0)",
                "https://game8.co/games/Genshin-Impact/archives/300002",
            ]
        );
        assert_eq!(regions[1].quests.len(), 3);
    }

    #[test]
    fn missing_container_yields_none() {
        let doc = fixture("no_rewards.html");
        assert_eq!(crawler().extract_regions(&doc), None);
    }

    #[test]
    fn invalid_container_selector_is_rejected() {
        let config = CrawlConfig {
            container_selector: "div..wrapper".to_string(),
            ..CrawlConfig::default()
        };
        assert!(matches!(
            Game8Crawler::new(&config),
            Err(CrawlerError::InvalidSelector(_))
        ));
    }
}
