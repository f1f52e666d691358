use crate::parser::FeedParser;
use crate::sources::FeedSource;
use crate::types::{FetchConfig, RawFeedItem, Result, SourceConfig};
use crate::Fetcher;
use async_trait::async_trait;
use tracing::info;

/// Generic RSS/Atom feed source: fetch with a short per-source timeout,
/// parse, and cap the yield so downstream enrichment stays bounded.
pub struct RssFeedSource {
    config: SourceConfig,
    fetcher: Fetcher,
    parser: FeedParser,
    max_items: usize,
}

impl RssFeedSource {
    pub fn new(config: SourceConfig, fetch_config: &FetchConfig, max_items: usize) -> Result<Self> {
        url::Url::parse(&config.url)?;

        Ok(Self {
            config,
            fetcher: Fetcher::new(fetch_config)?,
            parser: FeedParser::new(),
            max_items,
        })
    }
}

#[async_trait]
impl FeedSource for RssFeedSource {
    fn config(&self) -> &SourceConfig {
        &self.config
    }

    async fn read(&self) -> Result<Vec<RawFeedItem>> {
        let content = self.fetcher.fetch(&self.config.url).await?;
        let mut items = self.parser.parse(&content)?;
        items.truncate(self.max_items);

        info!(
            "Pulled {} items from {} ({})",
            items.len(),
            self.config.name,
            self.config.url
        );
        Ok(items)
    }
}
