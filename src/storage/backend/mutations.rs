//! Write operations for SeaOrmStore.

use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ExprTrait, QueryFilter, SqlErr, sea_query::Expr,
};
use tracing::info;

use super::SeaOrmStore;
use super::converters::{model_to_link, new_link_to_active_model};
use crate::errors::{LinkforgeError, Result};
use crate::storage::models::Link;
use crate::storage::{LinkUpdate, NewLink};

use migration::entities::link;

impl SeaOrmStore {
    pub(super) async fn insert_link(&self, new_link: NewLink) -> Result<Link> {
        let code = new_link.short_code.clone();
        let active_model = new_link_to_active_model(&new_link);

        match active_model.insert(&self.db).await {
            Ok(model) => {
                info!("Link created: {}", code);
                Ok(model_to_link(model))
            }
            Err(e) => {
                // The unique index on short_code is the uniqueness guarantee.
                if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    Err(LinkforgeError::conflict(format!(
                        "Short code already in use: {}",
                        code
                    )))
                } else {
                    Err(LinkforgeError::database_operation(format!(
                        "Failed to insert link: {}",
                        e
                    )))
                }
            }
        }
    }

    pub(super) async fn apply_update(&self, code: &str, update: LinkUpdate) -> Result<Option<Link>> {
        let Some(model) = link::Entity::find()
            .filter(link::Column::ShortCode.eq(code))
            .one(&self.db)
            .await
            .map_err(|e| LinkforgeError::database_operation(format!("Lookup failed: {}", e)))?
        else {
            return Ok(None);
        };

        let mut active_model = link::ActiveModel {
            id: Set(model.id),
            original_url: Set(update.original_url),
            ..Default::default()
        };
        if let Some(expires_at) = update.expires_at {
            active_model.expires_at = Set(Some(expires_at));
        }
        if let Some(collection_id) = update.collection_id {
            active_model.collection_id = Set(Some(collection_id));
        }

        let updated = active_model.update(&self.db).await.map_err(|e| {
            LinkforgeError::database_operation(format!("Failed to update link: {}", e))
        })?;

        info!("Link updated: {}", code);
        Ok(Some(model_to_link(updated)))
    }

    pub(super) async fn delete_by_code(&self, code: &str) -> Result<bool> {
        let result = link::Entity::delete_many()
            .filter(link::Column::ShortCode.eq(code))
            .exec(&self.db)
            .await
            .map_err(|e| {
                LinkforgeError::database_operation(format!("Failed to delete link: {}", e))
            })?;

        Ok(result.rows_affected > 0)
    }

    /// One atomic statement: clicks = clicks + 1, last_used_at = now.
    /// Unknown codes are a no-op.
    pub(super) async fn increment_use(&self, code: &str) -> Result<()> {
        link::Entity::update_many()
            .col_expr(
                link::Column::Clicks,
                Expr::col(link::Column::Clicks).add(1),
            )
            .col_expr(link::Column::LastUsedAt, Expr::value(Utc::now()))
            .filter(link::Column::ShortCode.eq(code))
            .exec(&self.db)
            .await
            .map_err(|e| {
                LinkforgeError::database_operation(format!("Failed to record use: {}", e))
            })?;

        Ok(())
    }

    pub(super) async fn set_collection(
        &self,
        code: &str,
        collection_id: Option<i64>,
    ) -> Result<Option<Link>> {
        let result = link::Entity::update_many()
            .col_expr(link::Column::CollectionId, Expr::value(collection_id))
            .filter(link::Column::ShortCode.eq(code))
            .exec(&self.db)
            .await
            .map_err(|e| {
                LinkforgeError::database_operation(format!("Failed to assign collection: {}", e))
            })?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        self.query_by_code(code).await
    }

    pub(super) async fn purge_expired(&self) -> Result<u64> {
        let now = Utc::now();

        let result = link::Entity::delete_many()
            .filter(link::Column::ExpiresAt.is_not_null())
            .filter(link::Column::ExpiresAt.lt(now))
            .exec(&self.db)
            .await
            .map_err(|e| {
                LinkforgeError::database_operation(format!("Failed to purge expired links: {}", e))
            })?;

        Ok(result.rows_affected)
    }

    pub(super) async fn delete_by_codes(&self, codes: &[String]) -> Result<u64> {
        if codes.is_empty() {
            return Ok(0);
        }

        let result = link::Entity::delete_many()
            .filter(link::Column::ShortCode.is_in(codes.iter().cloned()))
            .exec(&self.db)
            .await
            .map_err(|e| {
                LinkforgeError::database_operation(format!("Bulk delete failed: {}", e))
            })?;

        info!("Bulk deleted {} links", result.rows_affected);
        Ok(result.rows_affected)
    }
}
