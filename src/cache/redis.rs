//! Redis cache backend.
//!
//! Holds one multiplexed connection behind an RwLock, established lazily and
//! reset after any error. Every failure path degrades to
//! `CacheResult::Unavailable`; callers fall back to the store.

use std::sync::Arc;

use redis::{AsyncCommands, aio::MultiplexedConnection};
use tokio::sync::RwLock;
use tracing::{debug, error, trace};

use crate::cache::{CacheLayer, CacheResult, link_key, stats_key};
use crate::errors::{LinkforgeError, Result};
use crate::storage::LinkStats;

pub struct RedisCache {
    client: redis::Client,
    connection: Arc<RwLock<Option<MultiplexedConnection>>>,
    link_ttl: u64,
    stats_ttl: u64,
}

impl RedisCache {
    pub fn new(url: &str, link_ttl: u64, stats_ttl: u64) -> Result<Self> {
        let client = redis::Client::open(url).map_err(|e| {
            LinkforgeError::cache_connection(format!("Invalid Redis URL: {}", e))
        })?;

        debug!(
            "RedisCache created, link TTL {}s, stats TTL {}s",
            link_ttl, stats_ttl
        );

        Ok(Self {
            client,
            connection: Arc::new(RwLock::new(None)),
            link_ttl,
            stats_ttl,
        })
    }

    /// Returns the shared connection, establishing it on first use.
    async fn get_connection(&self) -> std::result::Result<MultiplexedConnection, redis::RedisError> {
        {
            let guard = self.connection.read().await;
            if let Some(ref conn) = *guard {
                return Ok(conn.clone());
            }
        }

        let mut guard = self.connection.write().await;

        // Another task may have connected while we waited for the lock.
        if let Some(ref conn) = *guard {
            return Ok(conn.clone());
        }

        let conn = self.client.get_multiplexed_async_connection().await?;
        *guard = Some(conn.clone());
        debug!("Redis connection established");
        Ok(conn)
    }

    async fn reset_connection(&self) {
        let mut guard = self.connection.write().await;
        *guard = None;
        debug!("Redis connection reset after error");
    }

    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        let mut conn = match self.get_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                self.reset_connection().await;
                return CacheResult::Unavailable;
            }
        };

        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(value)) => CacheResult::Hit(value),
            Ok(None) => CacheResult::Miss,
            Err(e) => {
                error!("Redis GET failed for '{}': {}", key, e);
                self.reset_connection().await;
                CacheResult::Unavailable
            }
        }
    }

    async fn set_raw(&self, key: String, value: String, ttl: u64) {
        let mut conn = match self.get_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                self.reset_connection().await;
                return;
            }
        };

        match conn.set_ex::<String, String, ()>(key.clone(), value, ttl).await {
            Ok(_) => trace!("Cached '{}'", key),
            Err(e) => {
                error!("Redis SETEX failed for '{}': {}", key, e);
                self.reset_connection().await;
            }
        }
    }

    async fn del_raw(&self, key: String) {
        let mut conn = match self.get_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                error!("Failed to get Redis connection: {}", e);
                self.reset_connection().await;
                return;
            }
        };

        match conn.del::<String, i32>(key.clone()).await {
            Ok(_) => trace!("Invalidated '{}'", key),
            Err(e) => {
                error!("Redis DEL failed for '{}': {}", key, e);
                self.reset_connection().await;
            }
        }
    }
}

#[async_trait::async_trait]
impl CacheLayer for RedisCache {
    async fn get_link(&self, code: &str) -> CacheResult<String> {
        self.get_raw(&link_key(code)).await
    }

    async fn put_link(&self, code: &str, url: &str) {
        self.set_raw(link_key(code), url.to_string(), self.link_ttl)
            .await;
    }

    async fn invalidate_link(&self, code: &str) {
        self.del_raw(link_key(code)).await;
    }

    async fn get_stats(&self, code: &str) -> CacheResult<LinkStats> {
        match self.get_raw(&stats_key(code)).await {
            CacheResult::Hit(raw) => match serde_json::from_str::<LinkStats>(&raw) {
                Ok(stats) => CacheResult::Hit(stats),
                Err(e) => {
                    error!("Corrupt stats entry for '{}': {}", code, e);
                    CacheResult::Unavailable
                }
            },
            CacheResult::Miss => CacheResult::Miss,
            CacheResult::Unavailable => CacheResult::Unavailable,
        }
    }

    async fn put_stats(&self, code: &str, stats: &LinkStats) {
        match serde_json::to_string(stats) {
            Ok(serialized) => {
                self.set_raw(stats_key(code), serialized, self.stats_ttl)
                    .await
            }
            Err(e) => error!("Failed to serialize stats for '{}': {}", code, e),
        }
    }

    async fn invalidate_stats(&self, code: &str) {
        self.del_raw(stats_key(code)).await;
    }
}
