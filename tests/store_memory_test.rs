// ABOUTME: Integration tests for the in-memory document store
// ABOUTME: Covers leases, token commits, counters, removal, and ordered filtered scans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use recipe_server::errors::ErrorCode;
use recipe_server::store::memory::InMemoryStore;
use recipe_server::store::{DocumentQuery, DocumentStore, LockToken, QueryFilter};
use serde_json::json;
use std::time::Duration;

const LEASE: Duration = Duration::from_secs(3);

#[tokio::test]
async fn test_insert_and_get() -> Result<()> {
    let store = InMemoryStore::new();
    store.insert_document("1", &json!({ "name": "soup" })).await?;

    assert_eq!(
        store.get_document("1").await?,
        Some(json!({ "name": "soup" }))
    );
    assert_eq!(store.get_document("2").await?, None);
    assert_eq!(store.len().await, 1);

    Ok(())
}

#[tokio::test]
async fn test_insert_existing_key_conflicts() -> Result<()> {
    let store = InMemoryStore::new();
    store.insert_document("1", &json!({})).await?;

    let err = store.insert_document("1", &json!({})).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceAlreadyExists);

    Ok(())
}

#[tokio::test]
async fn test_lease_excludes_second_lease() -> Result<()> {
    let store = InMemoryStore::new();
    store.insert_document("1", &json!({ "n": 1 })).await?;

    let locked = store.get_and_lock("1", LEASE).await?.unwrap();
    let err = store.get_and_lock("1", LEASE).await.unwrap_err();
    assert!(err.is_lock_contention());

    // Reads are not blocked by the lease
    assert_eq!(store.get_document("1").await?, Some(json!({ "n": 1 })));

    locked.lease.commit(&store, &json!({ "n": 2 })).await?;
    assert_eq!(store.get_document("1").await?, Some(json!({ "n": 2 })));

    // Commit released the lease
    let relocked = store.get_and_lock("1", LEASE).await?.unwrap();
    assert_eq!(relocked.document, json!({ "n": 2 }));

    Ok(())
}

#[tokio::test]
async fn test_get_and_lock_absent_key() -> Result<()> {
    let store = InMemoryStore::new();
    assert!(store.get_and_lock("missing", LEASE).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_unrepresentable_lease_is_rejected_without_locking() -> Result<()> {
    let store = InMemoryStore::new();
    store.insert_document("1", &json!({ "n": 1 })).await?;

    let err = store.get_and_lock("1", Duration::MAX).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);

    // The key was never locked, so an ordinary lease still succeeds
    let locked = store.get_and_lock("1", LEASE).await?.unwrap();
    locked.lease.commit(&store, &json!({ "n": 2 })).await?;
    assert_eq!(store.get_document("1").await?, Some(json!({ "n": 2 })));

    Ok(())
}

#[tokio::test]
async fn test_expired_lease_can_be_retaken_and_stale_commit_fails() -> Result<()> {
    let store = InMemoryStore::new();
    store.insert_document("1", &json!({ "n": 1 })).await?;

    let stale = store
        .get_and_lock("1", Duration::from_millis(20))
        .await?
        .unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(stale.lease.is_expired());

    let fresh = store.get_and_lock("1", LEASE).await?.unwrap();

    let err = stale
        .lease
        .commit(&store, &json!({ "n": 99 }))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceLocked);

    fresh.lease.commit(&store, &json!({ "n": 2 })).await?;
    assert_eq!(store.get_document("1").await?, Some(json!({ "n": 2 })));

    Ok(())
}

#[tokio::test]
async fn test_replace_with_unknown_token_fails() -> Result<()> {
    let store = InMemoryStore::new();
    store.insert_document("1", &json!({})).await?;

    let err = store
        .replace_with_lock_token("1", &json!({ "x": 1 }), &LockToken::generate())
        .await
        .unwrap_err();
    assert!(err.is_lock_contention());

    let err = store
        .replace_with_lock_token("2", &json!({}), &LockToken::generate())
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    Ok(())
}

#[tokio::test]
async fn test_remove_ignores_lease_and_reports_absence() -> Result<()> {
    let store = InMemoryStore::new();
    store.insert_document("1", &json!({})).await?;
    let locked = store.get_and_lock("1", LEASE).await?.unwrap();

    assert!(store.remove_document("1").await?);
    assert!(!store.remove_document("1").await?);

    let err = locked.lease.commit(&store, &json!({})).await.unwrap_err();
    assert!(err.is_not_found());

    Ok(())
}

#[tokio::test]
async fn test_atomic_increment_starts_at_initial() -> Result<()> {
    let store = InMemoryStore::new();

    assert_eq!(store.atomic_increment("ids", 1, 1).await?, 1);
    assert_eq!(store.atomic_increment("ids", 1, 1).await?, 2);
    assert_eq!(store.atomic_increment("ids", 5, 1).await?, 7);
    assert_eq!(store.atomic_increment("other", 1, 100).await?, 100);

    Ok(())
}

#[tokio::test]
async fn test_query_keeps_insertion_order_and_applies_filter_before_paging() -> Result<()> {
    let store = InMemoryStore::new();
    for (key, prep) in [("3", 10.0), ("1", 60.0), ("7", 20.0), ("2", 30.0)] {
        store
            .insert_document(key, &json!({ "preptime": prep }))
            .await?;
    }

    let all = store.execute_query(&DocumentQuery::page(0, 10)).await?;
    let keys: Vec<_> = all.iter().map(|row| row.key.as_str()).collect();
    assert_eq!(keys, ["3", "1", "7", "2"]);

    let under_50 = DocumentQuery::page(1, 10).with_filter(QueryFilter::LessThan {
        field: "preptime".to_owned(),
        value: 50.0,
    });
    let rows = store.execute_query(&under_50).await?;
    let keys: Vec<_> = rows.iter().map(|row| row.key.as_str()).collect();
    assert_eq!(keys, ["7", "2"]);

    let page = store.execute_query(&DocumentQuery::page(3, 10)).await?;
    assert_eq!(page.len(), 1);
    assert!(store
        .execute_query(&DocumentQuery::page(10, 10))
        .await?
        .is_empty());

    Ok(())
}

#[tokio::test]
async fn test_clear_all_resets_documents_and_counters() -> Result<()> {
    let store = InMemoryStore::new();
    store.insert_document("1", &json!({})).await?;
    store.atomic_increment("ids", 1, 1).await?;
    store.atomic_increment("ids", 1, 1).await?;

    store.clear_all().await?;

    assert!(store.is_empty().await);
    assert_eq!(store.atomic_increment("ids", 1, 1).await?, 1);
    store.health_check().await?;

    Ok(())
}
