use std::sync::Arc;

use tracing::error;

use crate::errors::{LinkforgeError, Result};
use crate::storage::LinkStats;

pub mod memory;
pub mod null;
pub mod redis;

pub use memory::MokaCache;
pub use null::NullCache;
pub use redis::RedisCache;

/// Outcome of a cache probe.
///
/// `Miss` and `Unavailable` are handled identically by callers (fall through
/// to the store); they are kept distinct so backend trouble is visible in
/// logs rather than silently folded into the miss rate.
#[derive(Debug, Clone)]
pub enum CacheResult<T> {
    Hit(T),
    Miss,
    Unavailable,
}

/// Best-effort accelerator in front of the store. Never authoritative and
/// never an error source: a backend failure degrades to `Unavailable`.
///
/// Wire contract: `link:{short_code}` holds the raw URL with the link TTL,
/// `stats:{short_code}` holds the stats snapshot JSON with the stats TTL.
#[async_trait::async_trait]
pub trait CacheLayer: Send + Sync {
    async fn get_link(&self, code: &str) -> CacheResult<String>;
    async fn put_link(&self, code: &str, url: &str);
    async fn invalidate_link(&self, code: &str);

    async fn get_stats(&self, code: &str) -> CacheResult<LinkStats>;
    async fn put_stats(&self, code: &str, stats: &LinkStats);
    async fn invalidate_stats(&self, code: &str);
}

pub(crate) fn link_key(code: &str) -> String {
    format!("link:{}", code)
}

pub(crate) fn stats_key(code: &str) -> String {
    format!("stats:{}", code)
}

pub struct CacheFactory;

impl CacheFactory {
    pub async fn create() -> Result<Arc<dyn CacheLayer>> {
        let config = crate::config::get_config();
        let cache = &config.cache;

        match cache.cache_type.as_str() {
            "memory" => Ok(Arc::new(MokaCache::new(
                cache.memory.max_capacity,
                cache.link_ttl_secs,
                cache.stats_ttl_secs,
            )) as Arc<dyn CacheLayer>),
            "redis" => {
                let backend =
                    RedisCache::new(&cache.redis.url, cache.link_ttl_secs, cache.stats_ttl_secs)?;
                Ok(Arc::new(backend) as Arc<dyn CacheLayer>)
            }
            "null" => Ok(Arc::new(NullCache) as Arc<dyn CacheLayer>),
            other => {
                error!("Unknown cache backend: {}", other);
                Err(LinkforgeError::cache_connection(format!(
                    "Unknown cache backend: {}. Supported: memory, redis, null",
                    other
                )))
            }
        }
    }
}
