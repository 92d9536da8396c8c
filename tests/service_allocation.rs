//! Allocation behavior against the in-memory storage port.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use linkcut::ShortenerError;
use linkcut::infrastructure::persistence::InMemoryShortenerRepository;
use linkcut::prelude::*;

use common::test_config;

fn make_service() -> ShortenerService<InMemoryShortenerRepository> {
    ShortenerService::new(
        Arc::new(InMemoryShortenerRepository::new()),
        &test_config(100, 60),
    )
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_allocations_never_share_an_id() {
    let service = Arc::new(make_service());
    let callers = 16;

    let mut handles = Vec::new();
    for i in 0..callers {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            service
                .allocate(&format!("https://example.com/page/{i}"), "user-1", 8)
                .await
                .unwrap()
        }));
    }

    let mut short_urls = HashSet::new();
    for handle in handles {
        short_urls.insert(handle.await.unwrap());
    }

    assert_eq!(short_urls.len(), callers);

    service.stop().await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn same_url_twice_resolves_to_one_mapping() {
    let service = Arc::new(make_service());
    let url = "https://example.com/shared";

    let first = {
        let service = service.clone();
        tokio::spawn(async move { service.allocate(url, "user-1", 8).await })
    };
    let second = {
        let service = service.clone();
        tokio::spawn(async move { service.allocate(url, "user-2", 8).await })
    };

    let outcomes = [first.await.unwrap(), second.await.unwrap()];

    let winners: Vec<&String> = outcomes.iter().filter_map(|r| r.as_ref().ok()).collect();
    assert_eq!(winners.len(), 1, "exactly one allocation must succeed");

    let conflicts = outcomes
        .iter()
        .filter(|r| matches!(r, Err(ShortenerError::UrlConflict { .. })))
        .count();
    assert_eq!(conflicts, 1, "the loser must observe a URL conflict");

    // The loser resolves to the winner's mapping.
    let resolved = service.lookup_by_original_url(url).await.unwrap();
    assert_eq!(resolved.as_deref(), Some(winners[0].as_str()));

    service.stop().await;
}

#[tokio::test]
async fn allocated_link_is_resolvable_by_id() {
    let service = make_service();

    let short_url = service
        .allocate("https://example.com/deep/path?q=1", "user-1", 8)
        .await
        .unwrap();
    let id = short_url.rsplit('/').next().unwrap();

    let link = service.lookup_by_id(id).await.unwrap();
    assert_eq!(link.original_url, "https://example.com/deep/path?q=1");
    assert_eq!(link.owner_id, "user-1");

    service.stop().await;
}

#[tokio::test]
async fn unknown_id_is_not_found() {
    let service = make_service();

    let result = service.lookup_by_id("missing1").await;
    assert!(matches!(result.unwrap_err(), ShortenerError::NotFound { .. }));

    service.stop().await;
}

#[tokio::test]
async fn bulk_insert_echoes_accepted_mappings() {
    let service = make_service();

    // A transport layer would hand us mappings parsed from a JSON body.
    let payload = r#"[
        {"correlation_id": "req-1", "original_url": "https://example.com/a"},
        {"correlation_id": "",      "original_url": "https://example.com/b"},
        {"correlation_id": "req-3", "original_url": "https://example.com/c"}
    ]"#;
    let mappings: Vec<BulkMapping> = serde_json::from_str(payload).unwrap();

    let results = service.bulk_insert(mappings, "user-1").await.unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].correlation_id, "req-1");
    assert_eq!(results[0].short_url, "http://localhost:8080/req-1");
    assert_eq!(results[1].correlation_id, "req-3");

    let link = service.lookup_by_id("req-3").await.unwrap();
    assert_eq!(link.original_url, "https://example.com/c");

    service.stop().await;
}

#[tokio::test]
async fn list_by_owner_returns_full_short_urls() {
    let service = make_service();

    service
        .allocate("https://example.com/one", "user-1", 8)
        .await
        .unwrap();
    service
        .allocate("https://example.com/two", "user-1", 8)
        .await
        .unwrap();
    service
        .allocate("https://example.com/three", "user-2", 8)
        .await
        .unwrap();

    let links = service.list_by_owner("user-1").await.unwrap();

    assert_eq!(links.len(), 2);
    assert!(
        links
            .iter()
            .all(|l| l.short_url.starts_with("http://localhost:8080/"))
    );

    service.stop().await;
}

#[tokio::test]
async fn health_and_stats_reach_the_port() {
    let service = make_service();

    service.health_check().await.unwrap();

    service
        .allocate("https://example.com/counted", "user-1", 8)
        .await
        .unwrap();
    let stats = service.stats().await.unwrap();
    assert_eq!(stats, StorageStats { urls: 1, users: 1 });

    service.stop().await;
}
