use crate::enrichment::Enricher;
use crate::normalizer;
use crate::sources::FeedSource;
use crate::types::{NewsItem, PipelineConfig};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

/// Whether one aggregation pass produced live data or had to degrade.
/// Only `Fresh` results may be written back to the cache.
#[derive(Debug)]
pub enum AggregationOutcome {
    Fresh(Vec<NewsItem>),
    Degraded(Vec<NewsItem>),
}

/// Runs every configured source concurrently, normalizes and merges their
/// items, and guards the whole pass with a hard wall-clock deadline.
pub struct Aggregator {
    sources: Vec<Arc<dyn FeedSource>>,
    enricher: Option<Arc<dyn Enricher>>,
    config: PipelineConfig,
}

impl Aggregator {
    pub fn new(
        sources: Vec<Arc<dyn FeedSource>>,
        enricher: Option<Arc<dyn Enricher>>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            sources,
            enricher,
            config,
        }
    }

    /// One aggregation pass. `fallback` is what the caller wants served if
    /// the deadline elapses or every source comes back empty (the previous
    /// cache contents or the bundled static dataset). Tasks that lose the
    /// race are abandoned; their results are discarded, never stored.
    pub async fn run(&self, fallback: Vec<NewsItem>) -> AggregationOutcome {
        match tokio::time::timeout(self.config.deadline, self.fetch_and_merge()).await {
            Ok(items) if !items.is_empty() => AggregationOutcome::Fresh(items),
            Ok(_) => {
                warn!("Every source came back empty, serving fallback data");
                AggregationOutcome::Degraded(fallback)
            }
            Err(_) => {
                warn!(
                    "Aggregation exceeded {:?} deadline, serving fallback data",
                    self.config.deadline
                );
                AggregationOutcome::Degraded(fallback)
            }
        }
    }

    async fn fetch_and_merge(&self) -> Vec<NewsItem> {
        let tasks: Vec<_> = self
            .sources
            .iter()
            .map(|source| {
                let source = Arc::clone(source);
                let enricher = self.enricher.clone();
                let summary_max_len = self.config.summary_max_len;
                tokio::spawn(
                    async move { read_source(source, enricher, summary_max_len).await },
                )
            })
            .collect();

        // Join-all semantics: every source finishes (or fails into an empty
        // contribution) before merging.
        let mut items: Vec<NewsItem> = join_all(tasks)
            .await
            .into_iter()
            .filter_map(|joined| joined.ok())
            .flatten()
            .collect();

        // Newest first; the sort is stable, so equal timestamps keep their
        // per-source arrival order.
        items.sort_by(|a, b| b.date.cmp(&a.date));

        info!(
            "Merged {} items from {} sources",
            items.len(),
            self.sources.len()
        );
        items
    }
}

/// Read one source and normalize its items. Per-item enrichment calls run
/// concurrently; each degrades independently to rule-based classification.
async fn read_source(
    source: Arc<dyn FeedSource>,
    enricher: Option<Arc<dyn Enricher>>,
    summary_max_len: usize,
) -> Vec<NewsItem> {
    let config = source.config().clone();

    let raw_items = match source.read().await {
        Ok(items) => items,
        Err(e) => {
            warn!("Source {} failed, contributing nothing: {}", config.name, e);
            return Vec::new();
        }
    };

    let item_futures = raw_items.into_iter().enumerate().map(|(index, raw)| {
        let enricher = enricher.clone();
        let config = config.clone();
        async move {
            let enrichment = match &enricher {
                Some(e) => {
                    let title = raw.title.as_deref().unwrap_or("无标题");
                    let body = normalizer::strip_html(raw.body.as_deref().unwrap_or(""));
                    match e.enrich(title, &body).await {
                        Ok(result) => Some(result),
                        Err(err) => {
                            warn!(
                                "Enrichment failed for item from {}, degrading to rule-based classification: {}",
                                config.name, err
                            );
                            None
                        }
                    }
                }
                None => None,
            };

            normalizer::normalize(&raw, enrichment, &config, index, summary_max_len)
        }
    });

    join_all(item_futures).await
}
