use crate::types::{AggregatorError, RawFeedItem, Result};
use chrono::Utc;
use feed_rs::parser;
use tracing::debug;

/// Converts a fetched feed document into raw items.
pub struct FeedParser;

impl FeedParser {
    pub fn new() -> Self {
        Self
    }

    pub fn parse(&self, content: &str) -> Result<Vec<RawFeedItem>> {
        let feed = parser::parse(content.as_bytes())
            .map_err(|e| AggregatorError::Parse(format!("Failed to parse feed: {}", e)))?;

        let items: Vec<RawFeedItem> = feed
            .entries
            .into_iter()
            .map(|entry| {
                let guid = if entry.id.is_empty() {
                    None
                } else {
                    Some(entry.id)
                };
                let link = entry.links.first().map(|l| l.href.clone());
                let title = entry.title.map(|t| t.content);

                let summary = entry.summary.map(|s| s.content);
                let content_body = entry.content.and_then(|c| c.body);
                // Prefer the short snippet for the body; keep the full
                // content around for image extraction.
                let body = summary.clone().or_else(|| content_body.clone());
                let raw_content = content_body.or(summary);

                RawFeedItem {
                    guid,
                    link,
                    title,
                    body,
                    published_at: entry.published.map(|dt| dt.with_timezone(&Utc)),
                    raw_content,
                }
            })
            .collect();

        debug!("Parsed feed with {} entries", items.len());
        Ok(items)
    }
}

impl Default for FeedParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Test Feed</title>
    <item>
      <guid>item-guid-1</guid>
      <title>First item</title>
      <link>https://example.com/1</link>
      <description>&lt;p&gt;Body one&lt;/p&gt;</description>
      <pubDate>Tue, 02 Jan 2024 00:00:00 GMT</pubDate>
    </item>
    <item>
      <title>Second item</title>
      <link>https://example.com/2</link>
      <description>Body two</description>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn parses_rss_entries() {
        let parser = FeedParser::new();
        let items = parser.parse(SAMPLE_RSS).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].guid.as_deref(), Some("item-guid-1"));
        assert_eq!(items[0].title.as_deref(), Some("First item"));
        assert_eq!(items[0].link.as_deref(), Some("https://example.com/1"));
        assert!(items[0].published_at.is_some());
        assert!(items[1].published_at.is_none());
    }

    #[test]
    fn rejects_non_feed_content() {
        let parser = FeedParser::new();
        assert!(parser.parse("not a feed at all").is_err());
    }
}
