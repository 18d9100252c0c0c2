use sea_orm::ActiveValue::{NotSet, Set};

use crate::storage::NewLink;
use crate::storage::models::Link;
use migration::entities::link;

pub fn model_to_link(model: link::Model) -> Link {
    Link {
        id: model.id,
        original_url: model.original_url,
        short_code: model.short_code,
        created_at: model.created_at,
        last_used_at: model.last_used_at,
        expires_at: model.expires_at,
        clicks: model.clicks.max(0),
        owner_id: model.owner_id,
        collection_id: model.collection_id,
    }
}

/// Builds the insert model for a fresh link. The id is database-assigned.
pub fn new_link_to_active_model(link: &NewLink) -> link::ActiveModel {
    link::ActiveModel {
        id: NotSet,
        original_url: Set(link.original_url.clone()),
        short_code: Set(link.short_code.clone()),
        created_at: Set(chrono::Utc::now()),
        last_used_at: Set(None),
        expires_at: Set(link.expires_at),
        clicks: Set(0),
        owner_id: Set(link.owner_id),
        collection_id: Set(link.collection_id),
    }
}
