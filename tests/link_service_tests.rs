//! LinkService tests
//!
//! Tests for the link management service layer: creation, aliasing,
//! deduplication, updates, deletion, search and stale cleanup.

use std::sync::Arc;

use chrono::{Duration, Utc};

use linkforge::cache::NullCache;
use linkforge::errors::LinkforgeError;
use linkforge::services::{CreateLinkRequest, LinkService, UpdateLinkRequest};
use linkforge::storage::{LinkStore, MemoryStore, OwnerScope};

// =============================================================================
// Test Setup
// =============================================================================

fn service() -> (Arc<MemoryStore>, LinkService) {
    let store = Arc::new(MemoryStore::new());
    let service = LinkService::new(store.clone(), Arc::new(NullCache), 6);
    (store, service)
}

fn request(url: &str) -> CreateLinkRequest {
    CreateLinkRequest {
        original_url: url.to_string(),
        custom_alias: None,
        expires_at: None,
        owner_id: None,
        collection_id: None,
    }
}

// =============================================================================
// Creation
// =============================================================================

#[tokio::test]
async fn test_create_link_generates_code() {
    let (_, service) = service();

    let result = service
        .create_link(request("https://example.com/page"))
        .await
        .unwrap();

    assert!(result.generated_code);
    assert!(!result.deduplicated);
    assert_eq!(result.link.short_code.len(), 6);
    assert!(result.link.short_code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(result.link.clicks, 0);
    assert!(result.link.last_used_at.is_none());
}

#[tokio::test]
async fn test_create_link_with_custom_alias() {
    let (store, service) = service();

    let mut req = request("https://example.com/docs");
    req.custom_alias = Some("mydocs".to_string());

    let result = service.create_link(req).await.unwrap();
    assert!(!result.generated_code);
    assert_eq!(result.link.short_code, "mydocs");

    assert!(store.get_by_code("mydocs").await.unwrap().is_some());
}

#[tokio::test]
async fn test_create_link_alias_conflict() {
    let (_, service) = service();

    let mut req = request("https://example.com/a");
    req.custom_alias = Some("taken1".to_string());
    service.create_link(req).await.unwrap();

    let mut req = request("https://example.com/b");
    req.custom_alias = Some("taken1".to_string());
    let result = service.create_link(req).await;
    assert!(matches!(result, Err(LinkforgeError::Conflict(_))));
}

#[tokio::test]
async fn test_create_link_alias_length_bounds() {
    let (_, service) = service();

    let mut req = request("https://example.com/short");
    req.custom_alias = Some("ab".to_string());
    assert!(matches!(
        service.create_link(req).await,
        Err(LinkforgeError::Validation(_))
    ));

    let mut req = request("https://example.com/short");
    req.custom_alias = Some("abc".to_string());
    assert!(service.create_link(req).await.is_ok());

    let mut req = request("https://example.com/long");
    req.custom_alias = Some("a".repeat(20));
    assert!(service.create_link(req).await.is_ok());

    let mut req = request("https://example.com/toolong");
    req.custom_alias = Some("a".repeat(21));
    assert!(matches!(
        service.create_link(req).await,
        Err(LinkforgeError::Validation(_))
    ));
}

#[tokio::test]
async fn test_create_link_alias_rejects_non_alphanumeric() {
    let (_, service) = service();

    for alias in ["my-docs", "my_docs", "my docs", "docs!"] {
        let mut req = request("https://example.com/x");
        req.custom_alias = Some(alias.to_string());
        assert!(
            matches!(
                service.create_link(req).await,
                Err(LinkforgeError::Validation(_))
            ),
            "alias {:?} should be rejected",
            alias
        );
    }
}

#[tokio::test]
async fn test_create_link_empty_alias_falls_back_to_generation() {
    let (_, service) = service();

    let mut req = request("https://example.com/fallback");
    req.custom_alias = Some(String::new());

    let result = service.create_link(req).await.unwrap();
    assert!(result.generated_code);
    assert_eq!(result.link.short_code.len(), 6);
}

#[tokio::test]
async fn test_create_link_rejects_invalid_urls() {
    let (_, service) = service();

    for url in [
        "",
        "not a url",
        "ftp://example.com/file",
        "javascript:alert(1)",
        "data:text/html,hi",
    ] {
        assert!(
            matches!(
                service.create_link(request(url)).await,
                Err(LinkforgeError::Validation(_))
            ),
            "url {:?} should be rejected",
            url
        );
    }
}

// =============================================================================
// Deduplication
// =============================================================================

#[tokio::test]
async fn test_anonymous_duplicate_url_reuses_link() {
    let (_, service) = service();

    let first = service
        .create_link(request("https://example.com/same"))
        .await
        .unwrap();
    let second = service
        .create_link(request("https://example.com/same"))
        .await
        .unwrap();

    assert!(second.deduplicated);
    assert_eq!(first.link.short_code, second.link.short_code);
    assert_eq!(first.link.id, second.link.id);
}

#[tokio::test]
async fn test_owned_duplicate_url_creates_new_link() {
    let (_, service) = service();

    service
        .create_link(request("https://example.com/same"))
        .await
        .unwrap();

    let mut req = request("https://example.com/same");
    req.owner_id = Some(7);
    let owned = service.create_link(req).await.unwrap();

    assert!(!owned.deduplicated);
    assert_eq!(owned.link.owner_id, Some(7));
}

#[tokio::test]
async fn test_aliased_duplicate_url_creates_new_link() {
    let (_, service) = service();

    let first = service
        .create_link(request("https://example.com/same"))
        .await
        .unwrap();

    let mut req = request("https://example.com/same");
    req.custom_alias = Some("branded".to_string());
    let aliased = service.create_link(req).await.unwrap();

    assert!(!aliased.deduplicated);
    assert_ne!(first.link.short_code, aliased.link.short_code);
}

// =============================================================================
// Update and delete
// =============================================================================

#[tokio::test]
async fn test_update_link_overwrites_url() {
    let (store, service) = service();

    let created = service
        .create_link(request("https://example.com/old"))
        .await
        .unwrap();
    let code = created.link.short_code.clone();

    let updated = service
        .update_link(
            &code,
            UpdateLinkRequest {
                original_url: "https://example.com/new".to_string(),
                expires_at: None,
                collection_id: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.original_url, "https://example.com/new");

    let stored = store.get_by_code(&code).await.unwrap().unwrap();
    assert_eq!(stored.original_url, "https://example.com/new");
}

#[tokio::test]
async fn test_update_unknown_link_is_not_found() {
    let (_, service) = service();

    let result = service
        .update_link(
            "ghost1",
            UpdateLinkRequest {
                original_url: "https://example.com/x".to_string(),
                expires_at: None,
                collection_id: None,
            },
        )
        .await;
    assert!(matches!(result, Err(LinkforgeError::NotFound(_))));
}

#[tokio::test]
async fn test_update_rejects_invalid_url() {
    let (_, service) = service();

    let created = service
        .create_link(request("https://example.com/keep"))
        .await
        .unwrap();

    let result = service
        .update_link(
            &created.link.short_code,
            UpdateLinkRequest {
                original_url: "javascript:alert(1)".to_string(),
                expires_at: None,
                collection_id: None,
            },
        )
        .await;
    assert!(matches!(result, Err(LinkforgeError::Validation(_))));
}

#[tokio::test]
async fn test_delete_link() {
    let (store, service) = service();

    let created = service
        .create_link(request("https://example.com/gone"))
        .await
        .unwrap();
    let code = created.link.short_code.clone();

    service.delete_link(&code).await.unwrap();
    assert!(store.get_by_code(&code).await.unwrap().is_none());

    let again = service.delete_link(&code).await;
    assert!(matches!(again, Err(LinkforgeError::NotFound(_))));
}

// =============================================================================
// Search, expired listings, collections
// =============================================================================

#[tokio::test]
async fn test_search_links_by_url_fragment() {
    let (_, service) = service();

    service
        .create_link(request("https://example.com/docs/intro"))
        .await
        .unwrap();
    service
        .create_link(request("https://example.com/docs/api"))
        .await
        .unwrap();
    service
        .create_link(request("https://other.net/blog"))
        .await
        .unwrap();

    let hits = service.search_links("example.com/docs").await.unwrap();
    assert_eq!(hits.len(), 2);

    let none = service.search_links("missing").await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_list_expired_respects_owner_scope() {
    let (_, service) = service();

    let past = Some(Utc::now() - Duration::hours(1));

    let mut anon = request("https://example.com/anon");
    anon.expires_at = past;
    service.create_link(anon).await.unwrap();

    let mut owned = request("https://example.com/owned");
    owned.expires_at = past;
    owned.owner_id = Some(42);
    service.create_link(owned).await.unwrap();

    let mut live = request("https://example.com/live");
    live.expires_at = Some(Utc::now() + Duration::hours(1));
    service.create_link(live).await.unwrap();

    let anon_expired = service.list_expired(OwnerScope::Anonymous).await.unwrap();
    assert_eq!(anon_expired.len(), 1);
    assert!(anon_expired[0].owner_id.is_none());

    let owner_expired = service.list_expired(OwnerScope::Owner(42)).await.unwrap();
    assert_eq!(owner_expired.len(), 1);
    assert_eq!(owner_expired[0].owner_id, Some(42));

    let other_owner = service.list_expired(OwnerScope::Owner(1)).await.unwrap();
    assert!(other_owner.is_empty());
}

#[tokio::test]
async fn test_assign_collection_attach_and_detach() {
    let (store, service) = service();

    let created = service
        .create_link(request("https://example.com/grouped"))
        .await
        .unwrap();
    let code = created.link.short_code.clone();

    let attached = service.assign_collection(&code, Some(3)).await.unwrap();
    assert_eq!(attached.collection_id, Some(3));

    let detached = service.assign_collection(&code, None).await.unwrap();
    assert!(detached.collection_id.is_none());

    let stored = store.get_by_code(&code).await.unwrap().unwrap();
    assert!(stored.collection_id.is_none());

    let missing = service.assign_collection("ghost1", Some(1)).await;
    assert!(matches!(missing, Err(LinkforgeError::NotFound(_))));
}

// =============================================================================
// Stale cleanup
// =============================================================================

#[tokio::test]
async fn test_delete_unused_keeps_recent_links() {
    let (store, service) = service();

    service
        .create_link(request("https://example.com/fresh"))
        .await
        .unwrap();

    // Everything was just created, nothing is older than the cutoff.
    let deleted = service.delete_unused(30).await.unwrap();
    assert_eq!(deleted, 0);
    assert_eq!(store.search_by_original_url("").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_unused_with_zero_cutoff_prunes_idle_links() {
    let (store, service) = service();

    let created = service
        .create_link(request("https://example.com/idle"))
        .await
        .unwrap();

    // Give the creation timestamp a moment to fall behind the cutoff.
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let deleted = service.delete_unused(0).await.unwrap();
    assert_eq!(deleted, 1);
    assert!(
        store
            .get_by_code(&created.link.short_code)
            .await
            .unwrap()
            .is_none()
    );
}
