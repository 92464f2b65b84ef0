use crate::{CrawlConfig, CrawlerError, Fetcher};
use tracing::debug;

/// Plain GET with no retry. Non-success statuses count as failures.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &CrawlConfig) -> Result<HttpFetcher, CrawlerError> {
        let mut builder = reqwest::Client::builder().timeout(config.request_timeout());
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        Ok(HttpFetcher {
            client: builder.build()?,
        })
    }
}

#[async_trait::async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, CrawlerError> {
        debug!("Visit {}", url);
        let html = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(html)
    }
}
