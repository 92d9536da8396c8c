#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use linkcut::domain::entities::{BulkMapping, ShortLink};
use linkcut::infrastructure::persistence::InMemoryShortenerRepository;
use linkcut::prelude::*;

/// Builds a config with deletion pipeline knobs suitable for the test.
pub fn test_config(batch_limit: usize, flush_interval_secs: u64) -> Config {
    Config {
        base_url: "http://localhost:8080".to_string(),
        id_length: 8,
        id_max_attempts: 64,
        delete_queue_capacity: 256,
        delete_batch_limit: batch_limit,
        delete_flush_interval_secs: flush_interval_secs,
        log_level: "info".to_string(),
        log_format: "text".to_string(),
    }
}

/// Storage port that records every soft-delete batch it receives while
/// delegating all operations to an in-memory repository.
#[derive(Default)]
pub struct RecordingRepository {
    inner: InMemoryShortenerRepository,
    flushes: Mutex<Vec<Vec<DeletionRequest>>>,
}

impl RecordingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all batches flushed so far, in arrival order.
    pub fn flushes(&self) -> Vec<Vec<DeletionRequest>> {
        self.flushes.lock().unwrap().clone()
    }

    pub fn flush_count(&self) -> usize {
        self.flushes.lock().unwrap().len()
    }
}

#[async_trait]
impl ShortenerRepository for RecordingRepository {
    async fn get_by_id(&self, id: &str) -> Result<ShortLink, ShortenerError> {
        self.inner.get_by_id(id).await
    }

    async fn get_by_original_url(&self, url: &str) -> Result<Option<String>, ShortenerError> {
        self.inner.get_by_original_url(url).await
    }

    async fn reserve_id(&self, id: &str, url: &str, owner_id: &str)
    -> Result<(), ShortenerError> {
        self.inner.reserve_id(id, url, owner_id).await
    }

    async fn bulk_insert(
        &self,
        mappings: &[BulkMapping],
        owner_id: &str,
    ) -> Result<(), ShortenerError> {
        self.inner.bulk_insert(mappings, owner_id).await
    }

    async fn bulk_soft_delete(&self, items: &[DeletionRequest]) -> Result<(), ShortenerError> {
        self.flushes.lock().unwrap().push(items.to_vec());
        self.inner.bulk_soft_delete(items).await
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<ShortLink>, ShortenerError> {
        self.inner.list_by_owner(owner_id).await
    }

    async fn health_check(&self) -> Result<(), ShortenerError> {
        self.inner.health_check().await
    }

    async fn stats(&self) -> Result<StorageStats, ShortenerError> {
        self.inner.stats().await
    }
}

/// Storage port whose soft-delete always fails, for at-most-once delivery
/// tests. Everything else delegates to an in-memory repository.
#[derive(Default)]
pub struct FailingDeleteRepository {
    inner: InMemoryShortenerRepository,
    attempts: Mutex<usize>,
}

impl FailingDeleteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delete_attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl ShortenerRepository for FailingDeleteRepository {
    async fn get_by_id(&self, id: &str) -> Result<ShortLink, ShortenerError> {
        self.inner.get_by_id(id).await
    }

    async fn get_by_original_url(&self, url: &str) -> Result<Option<String>, ShortenerError> {
        self.inner.get_by_original_url(url).await
    }

    async fn reserve_id(&self, id: &str, url: &str, owner_id: &str)
    -> Result<(), ShortenerError> {
        self.inner.reserve_id(id, url, owner_id).await
    }

    async fn bulk_insert(
        &self,
        mappings: &[BulkMapping],
        owner_id: &str,
    ) -> Result<(), ShortenerError> {
        self.inner.bulk_insert(mappings, owner_id).await
    }

    async fn bulk_soft_delete(&self, _items: &[DeletionRequest]) -> Result<(), ShortenerError> {
        *self.attempts.lock().unwrap() += 1;
        Err(ShortenerError::storage("soft delete backend down"))
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<ShortLink>, ShortenerError> {
        self.inner.list_by_owner(owner_id).await
    }

    async fn health_check(&self) -> Result<(), ShortenerError> {
        self.inner.health_check().await
    }

    async fn stats(&self) -> Result<StorageStats, ShortenerError> {
        self.inner.stats().await
    }
}

/// Polls `predicate` until it holds or `timeout` elapses.
pub async fn wait_until(timeout: Duration, predicate: impl Fn() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        if predicate() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
