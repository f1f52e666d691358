use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Closed set of topic labels. Classification must always resolve to one of
/// these; free-form suggestions from the enrichment model are validated
/// against this set and rejected if they fall outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "LLM")]
    Llm,
    #[serde(rename = "Computer Vision")]
    ComputerVision,
    Industry,
    Research,
    Tools,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Llm => "LLM",
            Category::ComputerVision => "Computer Vision",
            Category::Industry => "Industry",
            Category::Research => "Research",
            Category::Tools => "Tools",
        }
    }

    /// Parse a label back into the closed set. Anything unrecognized is
    /// `None`; callers re-derive the category instead of trusting it.
    pub fn from_label(label: &str) -> Option<Category> {
        match label.trim().to_lowercase().as_str() {
            "llm" => Some(Category::Llm),
            "computer vision" => Some(Category::ComputerVision),
            "industry" => Some(Category::Industry),
            "research" => Some(Category::Research),
            "tools" => Some(Category::Tools),
            _ => None,
        }
    }

    pub fn all() -> &'static [Category] {
        &[
            Category::Llm,
            Category::ComputerVision,
            Category::Industry,
            Category::Research,
            Category::Tools,
        ]
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry as pulled from a feed, before normalization. Ephemeral:
/// produced by the parser, consumed by the normalizer, then discarded.
#[derive(Debug, Clone, Default)]
pub struct RawFeedItem {
    pub guid: Option<String>,
    pub link: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    /// Unstripped entry content, kept around for image extraction.
    pub raw_content: Option<String>,
}

/// Outcome of the translate + classify enrichment call. The category is the
/// model's raw suggestion; the normalizer validates it against the closed
/// set.
#[derive(Debug, Clone)]
pub struct EnrichmentResult {
    pub title: String,
    pub summary: String,
    pub category_label: String,
}

/// Canonical news record. Immutable once constructed; owned collectively by
/// the result cache until superseded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub url: String,
    pub source: String,
    pub date: DateTime<Utc>,
    pub category: Category,
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// The single process-wide cache slot's contents.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub items: Vec<NewsItem>,
    pub fetched_at: DateTime<Utc>,
}

/// One configured feed endpoint.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    pub url: String,
    pub name: String,
    /// Used only when an item carries no classifiable text at all.
    pub default_category: Category,
}

impl SourceConfig {
    pub fn new(url: impl Into<String>, name: impl Into<String>, default_category: Category) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            default_category,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    /// Per-source network timeout, independent of the pipeline deadline.
    pub timeout: Duration,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "ainews/0.1".to_string(),
            timeout: Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Maximum age at which cached results are served without refetching.
    pub ttl: Duration,
    /// Hard wall-clock bound on one aggregation run.
    pub deadline: Duration,
    /// Per-source yield cap, applied before any enrichment work.
    pub max_items_per_source: usize,
    /// Final summary length in chars.
    pub summary_max_len: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(5 * 60),
            deadline: Duration::from_secs(20),
            max_items_per_source: 5,
            summary_max_len: 150,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Enrichment error: {0}")]
    Enrichment(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("no data available")]
    NoData,

    #[error("General error: {0}")]
    General(String),
}

pub type Result<T> = std::result::Result<T, AggregatorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_label_round_trip() {
        for cat in Category::all() {
            assert_eq!(Category::from_label(cat.label()), Some(*cat));
        }
    }

    #[test]
    fn category_from_label_rejects_out_of_set() {
        assert_eq!(Category::from_label("Sports"), None);
        assert_eq!(Category::from_label(""), None);
        assert_eq!(Category::from_label("llm stuff"), None);
    }

    #[test]
    fn category_from_label_is_case_insensitive() {
        assert_eq!(Category::from_label("llm"), Some(Category::Llm));
        assert_eq!(
            Category::from_label(" computer vision "),
            Some(Category::ComputerVision)
        );
    }

    #[test]
    fn category_serializes_with_display_labels() {
        let json = serde_json::to_string(&Category::ComputerVision).unwrap();
        assert_eq!(json, "\"Computer Vision\"");
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Category::ComputerVision);
    }
}
