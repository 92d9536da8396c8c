//! Collision-free short identifier allocation.

use std::sync::Arc;

use metrics::counter;
use tokio::sync::Mutex;

use crate::domain::repositories::ShortenerRepository;
use crate::error::ShortenerError;
use crate::utils::short_id::generate_short_id;

/// Allocates unique short identifiers against the storage port.
///
/// The whole generate-and-reserve sequence runs inside one process-wide
/// critical section, so at most one allocation is in flight across the
/// service at any time. This trades allocation throughput for a
/// trivially-correct uniqueness guarantee; storage-level uniqueness
/// constraints remain as defense in depth.
pub struct IdAllocator<R: ShortenerRepository> {
    repository: Arc<R>,
    lock: Mutex<()>,
    max_attempts: u32,
}

impl<R: ShortenerRepository> IdAllocator<R> {
    /// Creates an allocator with a bounded number of reservation attempts.
    pub fn new(repository: Arc<R>, max_attempts: u32) -> Self {
        Self {
            repository,
            lock: Mutex::new(()),
            max_attempts,
        }
    }

    /// Generates a random identifier of `length` characters and reserves it
    /// for `original_url`, regenerating on identifier collision.
    ///
    /// On success exactly one new record exists in storage and the reserved
    /// identifier is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::ExhaustedNamespace`] when every attempt up
    /// to the configured bound collided. Any error other than
    /// [`ShortenerError::IdConflict`] aborts the allocation immediately
    /// without retry; in particular a [`ShortenerError::UrlConflict`]
    /// propagates so the caller can resolve it to the existing mapping.
    pub async fn allocate(
        &self,
        original_url: &str,
        owner_id: &str,
        length: usize,
    ) -> Result<String, ShortenerError> {
        let _guard = self.lock.lock().await;

        for attempt in 1..=self.max_attempts {
            let id = generate_short_id(length);

            match self.repository.reserve_id(&id, original_url, owner_id).await {
                Ok(()) => return Ok(id),
                Err(ShortenerError::IdConflict { .. }) => {
                    counter!("linkcut_id_collisions_total").increment(1);
                    tracing::debug!(attempt, length, "short id collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        Err(ShortenerError::ExhaustedNamespace {
            attempts: self.max_attempts,
        })
    }
}
