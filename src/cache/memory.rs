//! In-process cache backend.
//!
//! Two moka caches with independent TTLs, one per logical namespace. Keys
//! are bare short codes; the `link:`/`stats:` prefixes only exist on shared
//! backends.

use std::time::Duration;

use moka::future::Cache;
use tracing::debug;

use crate::cache::{CacheLayer, CacheResult};
use crate::storage::LinkStats;

pub struct MokaCache {
    links: Cache<String, String>,
    stats: Cache<String, LinkStats>,
}

impl MokaCache {
    pub fn new(max_capacity: u64, link_ttl_secs: u64, stats_ttl_secs: u64) -> Self {
        let links = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(link_ttl_secs))
            .build();
        let stats = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(stats_ttl_secs))
            .build();

        debug!(
            "MokaCache initialized, capacity {}, link TTL {}s, stats TTL {}s",
            max_capacity, link_ttl_secs, stats_ttl_secs
        );
        Self { links, stats }
    }
}

#[async_trait::async_trait]
impl CacheLayer for MokaCache {
    async fn get_link(&self, code: &str) -> CacheResult<String> {
        match self.links.get(code).await {
            Some(url) => CacheResult::Hit(url),
            None => CacheResult::Miss,
        }
    }

    async fn put_link(&self, code: &str, url: &str) {
        self.links.insert(code.to_string(), url.to_string()).await;
    }

    async fn invalidate_link(&self, code: &str) {
        self.links.invalidate(code).await;
    }

    async fn get_stats(&self, code: &str) -> CacheResult<LinkStats> {
        match self.stats.get(code).await {
            Some(stats) => CacheResult::Hit(stats),
            None => CacheResult::Miss,
        }
    }

    async fn put_stats(&self, code: &str, stats: &LinkStats) {
        self.stats.insert(code.to_string(), stats.clone()).await;
    }

    async fn invalidate_stats(&self, code: &str) {
        self.stats.invalidate(code).await;
    }
}
