pub mod aggregator;
pub mod cache;
pub mod classifier;
pub mod digest;
pub mod enrichment;
pub mod fallback;
pub mod fetcher;
pub mod normalizer;
pub mod parser;
pub mod service;
pub mod sources;
pub mod types;

pub use aggregator::{AggregationOutcome, Aggregator};
pub use cache::NewsCache;
pub use digest::DailyBrief;
pub use enrichment::{is_cjk, Enricher, EnrichmentCapability, LlmEnricher};
pub use fetcher::Fetcher;
pub use parser::FeedParser;
pub use service::NewsService;
pub use sources::{FeedSource, RssFeedSource};
pub use types::*;
