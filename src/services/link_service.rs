//! Link management service.
//!
//! Owns the write path: creation with code generation or custom aliases,
//! updates, deletion, search, expired listings, and stale cleanup. Cache
//! invalidation always happens after the store mutation has committed.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::cache::CacheLayer;
use crate::errors::{LinkforgeError, Result};
use crate::storage::{Link, LinkStore, LinkUpdate, NewLink, OwnerScope};
use crate::utils::url_validator::validate_url;
use crate::utils::{generate_random_code, validate_alias};

/// Request to create a new link. Field values are assumed syntactically
/// pre-validated by the transport layer; alias format and URL safety are
/// re-checked here because uniqueness depends on them.
#[derive(Debug, Clone)]
pub struct CreateLinkRequest {
    pub original_url: String,
    pub custom_alias: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub owner_id: Option<i64>,
    pub collection_id: Option<i64>,
}

/// Request to update an existing link. The URL is always overwritten;
/// expiry and grouping only when supplied.
#[derive(Debug, Clone)]
pub struct UpdateLinkRequest {
    pub original_url: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub collection_id: Option<i64>,
}

#[derive(Debug, Clone)]
pub struct LinkCreateResult {
    pub link: Link,
    /// Whether the code was generated rather than user-supplied.
    pub generated_code: bool,
    /// Whether an existing link was returned instead of minting a new one.
    pub deduplicated: bool,
}

pub struct LinkService {
    store: Arc<dyn LinkStore>,
    cache: Arc<dyn CacheLayer>,
    code_length: usize,
}

impl LinkService {
    pub fn new(store: Arc<dyn LinkStore>, cache: Arc<dyn CacheLayer>, code_length: usize) -> Self {
        Self {
            store,
            cache,
            code_length,
        }
    }

    /// Create a new short link.
    ///
    /// Anonymous requests without an alias are idempotent by URL: an
    /// existing link for the same original URL is returned as-is. Aliased
    /// or owned requests always create a fresh record.
    pub async fn create_link(&self, req: CreateLinkRequest) -> Result<LinkCreateResult> {
        validate_url(&req.original_url)?;

        if let Some(alias) = req.custom_alias.as_deref().filter(|a| !a.is_empty()) {
            validate_alias(alias)?;

            if self.store.get_by_code(alias).await?.is_some() {
                return Err(LinkforgeError::conflict(format!(
                    "Short code already in use: {}",
                    alias
                )));
            }

            let link = self
                .store
                .create(NewLink {
                    original_url: req.original_url,
                    short_code: alias.to_string(),
                    expires_at: req.expires_at,
                    owner_id: req.owner_id,
                    collection_id: req.collection_id,
                })
                .await?;

            info!("Created link '{}' -> '{}'", link.short_code, link.original_url);
            return Ok(LinkCreateResult {
                link,
                generated_code: false,
                deduplicated: false,
            });
        }

        if req.owner_id.is_none()
            && let Some(existing) = self.store.get_by_original_url(&req.original_url).await?
        {
            info!(
                "Reusing existing link '{}' for duplicate URL",
                existing.short_code
            );
            return Ok(LinkCreateResult {
                link: existing,
                generated_code: false,
                deduplicated: true,
            });
        }

        let link = self.create_with_generated_code(&req).await?;
        info!("Created link '{}' -> '{}'", link.short_code, link.original_url);
        Ok(LinkCreateResult {
            link,
            generated_code: true,
            deduplicated: false,
        })
    }

    /// Draws codes until one is unused. The keyspace (62^length) makes
    /// collisions vanishingly rare, so the loop is unbounded; an insert
    /// race on a fresh draw is treated like any other collision.
    async fn create_with_generated_code(&self, req: &CreateLinkRequest) -> Result<Link> {
        loop {
            let code = generate_random_code(self.code_length);

            if self.store.get_by_code(&code).await?.is_some() {
                continue;
            }

            match self
                .store
                .create(NewLink {
                    original_url: req.original_url.clone(),
                    short_code: code,
                    expires_at: req.expires_at,
                    owner_id: req.owner_id,
                    collection_id: req.collection_id,
                })
                .await
            {
                Ok(link) => return Ok(link),
                Err(LinkforgeError::Conflict(_)) => {
                    warn!("Generated code collided on insert, redrawing");
                    continue;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Update an existing link; invalidates both cache entries after commit.
    pub async fn update_link(&self, code: &str, req: UpdateLinkRequest) -> Result<Link> {
        validate_url(&req.original_url)?;

        let updated = self
            .store
            .update(
                code,
                LinkUpdate {
                    original_url: req.original_url,
                    expires_at: req.expires_at,
                    collection_id: req.collection_id,
                },
            )
            .await?
            .ok_or_else(|| LinkforgeError::not_found(format!("Link '{}' not found", code)))?;

        self.cache.invalidate_link(code).await;
        self.cache.invalidate_stats(code).await;

        info!("Updated link '{}'", code);
        Ok(updated)
    }

    /// Delete a link; invalidates both cache entries after commit.
    pub async fn delete_link(&self, code: &str) -> Result<()> {
        if !self.store.remove(code).await? {
            return Err(LinkforgeError::not_found(format!(
                "Link '{}' not found",
                code
            )));
        }

        self.cache.invalidate_link(code).await;
        self.cache.invalidate_stats(code).await;

        info!("Deleted link '{}'", code);
        Ok(())
    }

    /// Substring search over original URLs.
    pub async fn search_links(&self, url_fragment: &str) -> Result<Vec<Link>> {
        self.store.search_by_original_url(url_fragment).await
    }

    /// Expired links for one owner or for anonymous links.
    pub async fn list_expired(&self, scope: OwnerScope) -> Result<Vec<Link>> {
        self.store.find_expired(scope).await
    }

    /// Prune links unused for at least `min_age_days`; returns the count.
    pub async fn delete_unused(&self, min_age_days: i64) -> Result<u64> {
        let cutoff = Utc::now() - Duration::days(min_age_days);

        let stale = self.store.find_stale(cutoff).await?;
        let codes: Vec<String> = stale.into_iter().map(|link| link.short_code).collect();
        let deleted = self.store.delete_many(&codes).await?;

        for code in &codes {
            self.cache.invalidate_link(code).await;
            self.cache.invalidate_stats(code).await;
        }

        info!("Pruned {} unused links (cutoff {} days)", deleted, min_age_days);
        Ok(deleted)
    }

    /// Attach or detach a link's grouping reference. Only the stats entry
    /// is invalidated, the URL did not change.
    pub async fn assign_collection(&self, code: &str, collection_id: Option<i64>) -> Result<Link> {
        let updated = self
            .store
            .assign_collection(code, collection_id)
            .await?
            .ok_or_else(|| LinkforgeError::not_found(format!("Link '{}' not found", code)))?;

        self.cache.invalidate_stats(code).await;
        Ok(updated)
    }
}
