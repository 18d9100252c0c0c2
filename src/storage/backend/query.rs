//! Read-only operations for SeaOrmStore.

use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, Condition, EntityTrait, QueryFilter};

use super::SeaOrmStore;
use super::converters::model_to_link;
use crate::errors::{LinkforgeError, Result};
use crate::storage::OwnerScope;
use crate::storage::models::Link;

use migration::entities::link;

impl SeaOrmStore {
    pub(super) async fn query_by_code(&self, code: &str) -> Result<Option<Link>> {
        link::Entity::find()
            .filter(link::Column::ShortCode.eq(code))
            .one(&self.db)
            .await
            .map(|model| model.map(model_to_link))
            .map_err(|e| {
                LinkforgeError::database_operation(format!("Lookup by code failed: {}", e))
            })
    }

    pub(super) async fn query_by_original_url(&self, url: &str) -> Result<Option<Link>> {
        link::Entity::find()
            .filter(link::Column::OriginalUrl.eq(url))
            .one(&self.db)
            .await
            .map(|model| model.map(model_to_link))
            .map_err(|e| {
                LinkforgeError::database_operation(format!("Lookup by URL failed: {}", e))
            })
    }

    pub(super) async fn query_url_substring(&self, fragment: &str) -> Result<Vec<Link>> {
        link::Entity::find()
            .filter(link::Column::OriginalUrl.contains(fragment))
            .all(&self.db)
            .await
            .map(|models| models.into_iter().map(model_to_link).collect())
            .map_err(|e| LinkforgeError::database_operation(format!("URL search failed: {}", e)))
    }

    pub(super) async fn query_stale(&self, cutoff: DateTime<Utc>) -> Result<Vec<Link>> {
        // last_used_at < cutoff, or never used and created before cutoff.
        let condition = Condition::any()
            .add(link::Column::LastUsedAt.lt(cutoff))
            .add(
                Condition::all()
                    .add(link::Column::LastUsedAt.is_null())
                    .add(link::Column::CreatedAt.lt(cutoff)),
            );

        link::Entity::find()
            .filter(condition)
            .all(&self.db)
            .await
            .map(|models| models.into_iter().map(model_to_link).collect())
            .map_err(|e| LinkforgeError::database_operation(format!("Stale scan failed: {}", e)))
    }

    pub(super) async fn query_expired(&self, scope: OwnerScope) -> Result<Vec<Link>> {
        let now = Utc::now();

        let mut query = link::Entity::find().filter(link::Column::ExpiresAt.lt(now));
        query = match scope {
            OwnerScope::Anonymous => query.filter(link::Column::OwnerId.is_null()),
            OwnerScope::Owner(id) => query.filter(link::Column::OwnerId.eq(id)),
        };

        query
            .all(&self.db)
            .await
            .map(|models| models.into_iter().map(model_to_link).collect())
            .map_err(|e| {
                LinkforgeError::database_operation(format!("Expired scan failed: {}", e))
            })
    }
}
