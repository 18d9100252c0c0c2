//! No-op cache backend: every probe is a miss, every write is discarded.
//! Used when caching is disabled and as a stand-in for tests.

use crate::cache::{CacheLayer, CacheResult};
use crate::storage::LinkStats;

pub struct NullCache;

#[async_trait::async_trait]
impl CacheLayer for NullCache {
    async fn get_link(&self, _code: &str) -> CacheResult<String> {
        CacheResult::Miss
    }

    async fn put_link(&self, _code: &str, _url: &str) {}

    async fn invalidate_link(&self, _code: &str) {}

    async fn get_stats(&self, _code: &str) -> CacheResult<LinkStats> {
        CacheResult::Miss
    }

    async fn put_stats(&self, _code: &str, _stats: &LinkStats) {}

    async fn invalidate_stats(&self, _code: &str) {}
}
