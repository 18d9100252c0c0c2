//! Resolution engine: answers "where does this code point" and records usage.

use std::sync::Arc;

use tracing::debug;

use crate::cache::{CacheLayer, CacheResult};
use crate::errors::{LinkforgeError, Result};
use crate::storage::{LinkStats, LinkStore};

/// Outcome of a resolution, consumed by the redirect layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Redirect(String),
    NotFound,
    Gone,
}

pub struct Resolver {
    store: Arc<dyn LinkStore>,
    cache: Arc<dyn CacheLayer>,
}

impl Resolver {
    pub fn new(store: Arc<dyn LinkStore>, cache: Arc<dyn CacheLayer>) -> Self {
        Self { store, cache }
    }

    /// Cache-aside resolution.
    ///
    /// A cache hit is served without re-checking `expires_at`: a link can be
    /// served for at most one link-TTL window past its logical expiry. The
    /// stats entry is invalidated on every successful resolution because the
    /// click count just changed; the link entry is not, the URL did not.
    pub async fn resolve(&self, code: &str) -> Result<Resolution> {
        if let CacheResult::Hit(url) = self.cache.get_link(code).await {
            self.store.record_use(code).await?;
            self.cache.invalidate_stats(code).await;
            return Ok(Resolution::Redirect(url));
        }

        let Some(link) = self.store.get_by_code(code).await? else {
            debug!("Resolution miss, unknown code: {}", code);
            return Ok(Resolution::NotFound);
        };

        if link.is_expired() {
            // A link discovered expired must never be cached as valid.
            debug!("Resolution hit expired link: {}", code);
            return Ok(Resolution::Gone);
        }

        self.store.record_use(code).await?;
        self.cache.invalidate_stats(code).await;
        self.cache.put_link(code, &link.original_url).await;

        Ok(Resolution::Redirect(link.original_url))
    }

    /// Cache-aside stats snapshot. No usage side effect.
    pub async fn stats(&self, code: &str) -> Result<LinkStats> {
        if let CacheResult::Hit(stats) = self.cache.get_stats(code).await {
            return Ok(stats);
        }

        let link = self
            .store
            .get_by_code(code)
            .await?
            .ok_or_else(|| LinkforgeError::not_found(format!("Link '{}' not found", code)))?;

        let stats = link.stats();
        self.cache.put_stats(code, &stats).await;
        Ok(stats)
    }
}
