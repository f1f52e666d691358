use crate::aggregator::{AggregationOutcome, Aggregator};
use crate::cache::NewsCache;
use crate::digest::{self, DailyBrief};
use crate::enrichment::{Enricher, EnrichmentCapability};
use crate::fallback;
use crate::sources::FeedSource;
use crate::types::{AggregatorError, NewsItem, PipelineConfig, Result};
use std::sync::Arc;
use tracing::{info, warn};

/// The query entry point: a staleness-aware cache in front of the
/// aggregator. Read-driven; refresh happens only as a side effect of a
/// query (forced or TTL-expired).
pub struct NewsService {
    cache: Arc<NewsCache>,
    aggregator: Aggregator,
    enricher: Option<Arc<dyn Enricher>>,
    config: PipelineConfig,
    fallback_items: Vec<NewsItem>,
}

impl NewsService {
    pub fn new(
        sources: Vec<Arc<dyn FeedSource>>,
        enricher: Option<Arc<dyn Enricher>>,
        config: PipelineConfig,
    ) -> Self {
        let aggregator = Aggregator::new(sources, enricher.clone(), config.clone());
        Self {
            cache: Arc::new(NewsCache::new()),
            aggregator,
            enricher,
            config,
            fallback_items: fallback::fallback_items(),
        }
    }

    pub fn from_capability(
        sources: Vec<Arc<dyn FeedSource>>,
        capability: &EnrichmentCapability,
        config: PipelineConfig,
    ) -> Self {
        if capability.is_enabled() {
            info!("Enrichment capability enabled");
        } else {
            info!("Enrichment capability disabled, rule-based classification only");
        }
        Self::new(sources, capability.resolve(), config)
    }

    /// Replace the bundled static dataset.
    pub fn with_fallback(mut self, items: Vec<NewsItem>) -> Self {
        self.fallback_items = items;
        self
    }

    /// Fetch the latest news, serving the cache when it is fresh enough.
    ///
    /// Degrades instead of failing at every level; the only error is
    /// `NoData`, when live aggregation, the cache and the static fallback
    /// are all empty.
    pub async fn query(&self, force_refresh: bool) -> Result<Vec<NewsItem>> {
        if !force_refresh {
            if let Some(items) = self.cache.get_fresh(self.config.ttl).await {
                info!("Returning cached news ({} items)", items.len());
                return Ok(items);
            }
        }

        info!(
            "Fetching news{}",
            if force_refresh { " (force refresh)" } else { "" }
        );

        // Stale cache contents beat the static dataset as degradation
        // material.
        let stale = self
            .cache
            .get()
            .await
            .map(|entry| entry.items)
            .filter(|items| !items.is_empty());
        let degraded = stale.unwrap_or_else(|| self.fallback_items.clone());

        match self.aggregator.run(degraded).await {
            AggregationOutcome::Fresh(items) => {
                // Only the path that won the race may touch the cache.
                self.cache.store(items.clone()).await;
                Ok(items)
            }
            AggregationOutcome::Degraded(items) => {
                if items.is_empty() {
                    warn!("No live data, no cache, no fallback");
                    Err(AggregatorError::NoData)
                } else {
                    Ok(items)
                }
            }
        }
    }

    /// Generate the daily brief over freshly aggregated items. Requires the
    /// enrichment capability.
    pub async fn daily_brief(&self) -> Result<DailyBrief> {
        let enricher = self.enricher.as_deref().ok_or_else(|| {
            AggregatorError::Enrichment("API credential not configured".to_string())
        })?;

        let items = self.query(true).await?;
        digest::generate_brief(enricher, &items).await
    }
}
