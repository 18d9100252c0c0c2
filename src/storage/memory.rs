//! In-memory store backend.
//!
//! Backs tests and small single-process deployments. Per-code atomicity
//! comes from the map's shard locks; there is no durability.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::errors::{LinkforgeError, Result};
use crate::storage::models::Link;
use crate::storage::{LinkStore, LinkUpdate, NewLink, OwnerScope};

#[derive(Default)]
pub struct MemoryStore {
    links: DashMap<String, Link>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            links: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait::async_trait]
impl LinkStore for MemoryStore {
    async fn create(&self, link: NewLink) -> Result<Link> {
        // The entry API holds the shard lock, so check-and-insert is atomic.
        match self.links.entry(link.short_code.clone()) {
            Entry::Occupied(_) => Err(LinkforgeError::conflict(format!(
                "Short code already in use: {}",
                link.short_code
            ))),
            Entry::Vacant(vacant) => {
                let record = Link {
                    id: self.next_id.fetch_add(1, Ordering::Relaxed),
                    original_url: link.original_url,
                    short_code: link.short_code,
                    created_at: Utc::now(),
                    last_used_at: None,
                    expires_at: link.expires_at,
                    clicks: 0,
                    owner_id: link.owner_id,
                    collection_id: link.collection_id,
                };
                vacant.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn get_by_code(&self, code: &str) -> Result<Option<Link>> {
        Ok(self.links.get(code).map(|entry| entry.clone()))
    }

    async fn get_by_original_url(&self, url: &str) -> Result<Option<Link>> {
        Ok(self
            .links
            .iter()
            .find(|entry| entry.original_url == url)
            .map(|entry| entry.clone()))
    }

    async fn update(&self, code: &str, update: LinkUpdate) -> Result<Option<Link>> {
        match self.links.get_mut(code) {
            Some(mut entry) => {
                entry.original_url = update.original_url;
                if let Some(expires_at) = update.expires_at {
                    entry.expires_at = Some(expires_at);
                }
                if let Some(collection_id) = update.collection_id {
                    entry.collection_id = Some(collection_id);
                }
                Ok(Some(entry.clone()))
            }
            None => Ok(None),
        }
    }

    async fn remove(&self, code: &str) -> Result<bool> {
        Ok(self.links.remove(code).is_some())
    }

    async fn record_use(&self, code: &str) -> Result<()> {
        if let Some(mut entry) = self.links.get_mut(code) {
            entry.clicks += 1;
            entry.last_used_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn assign_collection(
        &self,
        code: &str,
        collection_id: Option<i64>,
    ) -> Result<Option<Link>> {
        match self.links.get_mut(code) {
            Some(mut entry) => {
                entry.collection_id = collection_id;
                Ok(Some(entry.clone()))
            }
            None => Ok(None),
        }
    }

    async fn search_by_original_url(&self, fragment: &str) -> Result<Vec<Link>> {
        Ok(self
            .links
            .iter()
            .filter(|entry| entry.original_url.contains(fragment))
            .map(|entry| entry.clone())
            .collect())
    }

    async fn find_stale(&self, cutoff: DateTime<Utc>) -> Result<Vec<Link>> {
        Ok(self
            .links
            .iter()
            .filter(|entry| match entry.last_used_at {
                Some(used) => used < cutoff,
                None => entry.created_at < cutoff,
            })
            .map(|entry| entry.clone())
            .collect())
    }

    async fn find_expired(&self, scope: OwnerScope) -> Result<Vec<Link>> {
        let now = Utc::now();
        Ok(self
            .links
            .iter()
            .filter(|entry| matches!(entry.expires_at, Some(at) if at < now))
            .filter(|entry| match scope {
                OwnerScope::Anonymous => entry.owner_id.is_none(),
                OwnerScope::Owner(id) => entry.owner_id == Some(id),
            })
            .map(|entry| entry.clone())
            .collect())
    }

    async fn delete_expired(&self) -> Result<u64> {
        let now = Utc::now();
        let expired: Vec<String> = self
            .links
            .iter()
            .filter(|entry| matches!(entry.expires_at, Some(at) if at < now))
            .map(|entry| entry.short_code.clone())
            .collect();

        let mut deleted = 0;
        for code in expired {
            if self.links.remove(&code).is_some() {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    async fn delete_many(&self, codes: &[String]) -> Result<u64> {
        let mut deleted = 0;
        for code in codes {
            if self.links.remove(code).is_some() {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
