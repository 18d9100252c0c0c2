use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::error;

use crate::errors::{LinkforgeError, Result};

pub mod backend;
pub mod memory;
pub mod models;

pub use backend::SeaOrmStore;
pub use memory::MemoryStore;
pub use models::{Link, LinkStats};

/// Input for `LinkStore::create`. The short code has already been validated
/// (or generated) by the service layer.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub original_url: String,
    pub short_code: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub owner_id: Option<i64>,
    pub collection_id: Option<i64>,
}

/// Partial update: the URL is always overwritten, expiry and grouping only
/// when supplied.
#[derive(Debug, Clone)]
pub struct LinkUpdate {
    pub original_url: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub collection_id: Option<i64>,
}

/// Scope for expired-link listings: a specific owner, or anonymous
/// (ownerless) links only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerScope {
    Anonymous,
    Owner(i64),
}

/// Authoritative, transactional record of links. Every mutation is atomic
/// with respect to its own effect; the cache layer is never consulted here.
#[async_trait::async_trait]
pub trait LinkStore: Send + Sync {
    /// Fails with `Conflict` if the short code is already taken.
    async fn create(&self, link: NewLink) -> Result<Link>;

    async fn get_by_code(&self, code: &str) -> Result<Option<Link>>;

    /// Point lookup by exact original URL, used to deduplicate anonymous
    /// creations.
    async fn get_by_original_url(&self, url: &str) -> Result<Option<Link>>;

    /// Returns `None` when the code is unknown.
    async fn update(&self, code: &str, update: LinkUpdate) -> Result<Option<Link>>;

    /// Returns whether a record existed.
    async fn remove(&self, code: &str) -> Result<bool>;

    /// Atomically increments `clicks` and sets `last_used_at` to now.
    /// Concurrent callers on the same code must not lose increments.
    async fn record_use(&self, code: &str) -> Result<()>;

    /// Attaches or detaches the link's grouping reference.
    async fn assign_collection(&self, code: &str, collection_id: Option<i64>)
    -> Result<Option<Link>>;

    /// Substring search over original URLs.
    async fn search_by_original_url(&self, fragment: &str) -> Result<Vec<Link>>;

    /// Links last used before `cutoff`, or never used and created before it.
    async fn find_stale(&self, cutoff: DateTime<Utc>) -> Result<Vec<Link>>;

    /// Links whose `expires_at` has passed, restricted to the given scope.
    async fn find_expired(&self, scope: OwnerScope) -> Result<Vec<Link>>;

    /// Deletes every link with `expires_at` in the past; returns the count.
    async fn delete_expired(&self) -> Result<u64>;

    /// Bulk delete by short code; returns the number of rows removed.
    async fn delete_many(&self, codes: &[String]) -> Result<u64>;

    fn backend_name(&self) -> &'static str;
}

pub struct StoreFactory;

impl StoreFactory {
    pub async fn create() -> Result<Arc<dyn LinkStore>> {
        let config = crate::config::get_config();
        let backend = &config.database.backend;

        match backend.as_str() {
            "sqlite" | "mysql" | "postgres" | "mariadb" => {
                // The URL decides the actual flavor; the configured backend
                // only opts into a database-backed store.
                let flavor = backend::infer_backend_from_url(&config.database.database_url)?;
                let store =
                    SeaOrmStore::connect(&config.database.database_url, &flavor).await?;
                Ok(Arc::new(store) as Arc<dyn LinkStore>)
            }
            "memory" => Ok(Arc::new(MemoryStore::new()) as Arc<dyn LinkStore>),
            _ => {
                error!("Unknown store backend: {}", backend);
                Err(LinkforgeError::database_config(format!(
                    "Unknown store backend: {}. Supported: sqlite, mysql, postgres, mariadb, memory",
                    backend
                )))
            }
        }
    }
}
