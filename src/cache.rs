use crate::types::{CacheEntry, NewsItem};
use chrono::Utc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// The single process-wide result slot. Created empty at startup, replaced
/// wholesale (never merged in place) on each successful aggregation, read
/// by every query. Freshness is checked at read time; there is no expiry
/// timer.
pub struct NewsCache {
    slot: RwLock<Option<CacheEntry>>,
}

impl NewsCache {
    pub fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// The current entry, fresh or stale.
    pub async fn get(&self) -> Option<CacheEntry> {
        self.slot.read().await.clone()
    }

    /// The cached items, only if the entry is younger than `ttl`.
    pub async fn get_fresh(&self, ttl: Duration) -> Option<Vec<NewsItem>> {
        let guard = self.slot.read().await;
        let entry = guard.as_ref()?;
        let age = Utc::now().signed_duration_since(entry.fetched_at);
        if age.to_std().map(|age| age < ttl).unwrap_or(false) {
            debug!("Cache hit ({} items, age {})", entry.items.len(), age);
            Some(entry.items.clone())
        } else {
            None
        }
    }

    /// Replace the slot with a new snapshot stamped now.
    pub async fn store(&self, items: Vec<NewsItem>) {
        let mut guard = self.slot.write().await;
        *guard = Some(CacheEntry {
            items,
            fetched_at: Utc::now(),
        });
    }
}

impl Default for NewsCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn item(id: &str) -> NewsItem {
        NewsItem {
            id: id.to_string(),
            title: "t".to_string(),
            summary: "s".to_string(),
            url: "#".to_string(),
            source: "test".to_string(),
            date: Utc::now(),
            category: Category::Industry,
            image_url: None,
        }
    }

    #[tokio::test]
    async fn starts_empty() {
        let cache = NewsCache::new();
        assert!(cache.get().await.is_none());
        assert!(cache.get_fresh(Duration::from_secs(60)).await.is_none());
    }

    #[tokio::test]
    async fn fresh_within_ttl_stale_after() {
        let cache = NewsCache::new();
        cache.store(vec![item("a")]).await;

        let fresh = cache.get_fresh(Duration::from_secs(60)).await;
        assert_eq!(fresh.unwrap().len(), 1);

        // Zero TTL: the entry is immediately stale but still retrievable.
        assert!(cache.get_fresh(Duration::from_secs(0)).await.is_none());
        assert!(cache.get().await.is_some());
    }

    #[tokio::test]
    async fn store_replaces_wholesale() {
        let cache = NewsCache::new();
        cache.store(vec![item("a"), item("b")]).await;
        cache.store(vec![item("c")]).await;

        let entry = cache.get().await.unwrap();
        assert_eq!(entry.items.len(), 1);
        assert_eq!(entry.items[0].id, "c");
    }
}
