use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authoritative link record, owned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub clicks: i64,
    pub owner_id: Option<i64>,
    pub collection_id: Option<i64>,
}

impl Link {
    /// Logically expired: `expires_at` has passed. The record may still be
    /// physically present until the sweeper removes it.
    pub fn is_expired(&self) -> bool {
        matches!(self.expires_at, Some(at) if at < Utc::now())
    }

    /// Snapshot of the fields served by the stats path.
    pub fn stats(&self) -> LinkStats {
        LinkStats {
            original_url: self.original_url.clone(),
            created_at: self.created_at,
            clicks: self.clicks,
            last_used_at: self.last_used_at,
            collection_id: self.collection_id,
        }
    }
}

/// Serialized form stored under `stats:{short_code}`. Field names are part
/// of the cache-entry contract, do not rename.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkStats {
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub clicks: i64,
    pub last_used_at: Option<DateTime<Utc>>,
    pub collection_id: Option<i64>,
}
