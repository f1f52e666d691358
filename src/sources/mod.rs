pub mod rss_feed;

pub use rss_feed::RssFeedSource;

use crate::types::{RawFeedItem, Result, SourceConfig};
use async_trait::async_trait;

/// Trait for anything that can fetch and parse one feed endpoint into raw
/// items. Errors are contained by the aggregator: a failing source
/// contributes nothing, it never fails the run.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// The source's configuration (display name, default category).
    fn config(&self) -> &SourceConfig;

    /// Fetch and parse the feed, truncated to the configured per-source cap.
    async fn read(&self) -> Result<Vec<RawFeedItem>>;
}
