//! Storage port trait for short link persistence.

use crate::domain::deletion_request::DeletionRequest;
use crate::domain::entities::{BulkMapping, ShortLink};
use crate::error::ShortenerError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Aggregate counts over the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageStats {
    /// Number of live (non-deleted) short links.
    pub urls: u64,
    /// Number of distinct owners with at least one live link.
    pub users: u64,
}

/// Storage port consumed by the service core.
///
/// Implementations (file-backed, relational) live outside this crate; an
/// in-memory adapter suitable for tests and single-process deployments is
/// provided in [`crate::infrastructure::persistence::InMemoryShortenerRepository`].
///
/// Implementations must be safe for concurrent use: the core shares one
/// instance across all callers and the deletion worker, and adds no locking
/// of its own around port calls beyond the allocator's critical section.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortenerRepository: Send + Sync {
    /// Looks up a record by its short identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::NotFound`] if no record exists,
    /// [`ShortenerError::Deleted`] if the record was soft-deleted, and
    /// [`ShortenerError::Storage`] on backend failures.
    async fn get_by_id(&self, id: &str) -> Result<ShortLink, ShortenerError>;

    /// Finds the short identifier already assigned to an original URL.
    ///
    /// Returns `Ok(None)` when the URL has not been shortened.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::Storage`] on backend failures.
    async fn get_by_original_url(&self, url: &str) -> Result<Option<String>, ShortenerError>;

    /// Atomically inserts `id -> url` if the identifier is absent.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::IdConflict`] if the identifier is taken,
    /// [`ShortenerError::UrlConflict`] if the URL already has an identifier,
    /// and [`ShortenerError::Storage`] on other backend failures. The two
    /// conflict variants must stay distinct: the allocator retries only on
    /// identifier conflicts.
    async fn reserve_id(&self, id: &str, url: &str, owner_id: &str)
    -> Result<(), ShortenerError>;

    /// Inserts a batch of mappings, using each `correlation_id` as the
    /// stored short identifier. All-or-nothing.
    ///
    /// # Errors
    ///
    /// Returns a conflict variant if any identifier or URL is taken, and
    /// [`ShortenerError::Storage`] on backend failures.
    async fn bulk_insert(
        &self,
        mappings: &[BulkMapping],
        owner_id: &str,
    ) -> Result<(), ShortenerError>;

    /// Marks the given links as deleted in one batch.
    ///
    /// Only links owned by the request's `owner_id` are affected; unknown
    /// identifiers and foreign links are skipped, making the operation
    /// idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::Storage`] on backend failures.
    async fn bulk_soft_delete(&self, items: &[DeletionRequest]) -> Result<(), ShortenerError>;

    /// Lists all live links belonging to an owner.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::Storage`] on backend failures.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<ShortLink>, ShortenerError>;

    /// Checks whether the backing store is reachable.
    async fn health_check(&self) -> Result<(), ShortenerError>;

    /// Returns aggregate counts over the store.
    async fn stats(&self) -> Result<StorageStats, ShortenerError>;
}
