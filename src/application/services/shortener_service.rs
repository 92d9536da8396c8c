//! Shortener service: the composition root for allocation, lookups,
//! bulk insertion, and deletion scheduling.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;

use crate::application::services::IdAllocator;
use crate::config::Config;
use crate::domain::deletion_request::DeletionRequest;
use crate::domain::deletion_worker::{DeletionWorkerConfig, FlushReport, run_deletion_worker};
use crate::domain::entities::{BulkMapping, BulkResult, OwnerLink, ShortLink};
use crate::domain::repositories::{ShortenerRepository, StorageStats};
use crate::error::ShortenerError;
use crate::utils::url_normalizer::normalize_url;

/// Service facade consumed by the transport layer.
///
/// Owns the deletion intake channel and the worker task; every instance is
/// fully self-contained, so independent services can coexist in one process
/// (and in tests). [`ShortenerService::stop`] must be called before process
/// exit so the final deletion flush completes.
pub struct ShortenerService<R: ShortenerRepository + 'static> {
    repository: Arc<R>,
    allocator: IdAllocator<R>,
    base_url: String,
    /// Intake sender; taken (and thereby closed) by [`Self::stop`].
    delete_tx: Mutex<Option<mpsc::Sender<DeletionRequest>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl<R: ShortenerRepository + 'static> ShortenerService<R> {
    /// Creates the service and spawns its deletion worker.
    pub fn new(repository: Arc<R>, config: &Config) -> Self {
        Self::build(repository, config, None)
    }

    /// Like [`Self::new`], but each non-empty deletion flush additionally
    /// reports its outcome on `reports`.
    ///
    /// The pipeline stays at-most-once either way; the channel only makes
    /// outcomes observable for callers that need delivery confirmation.
    pub fn with_flush_reports(
        repository: Arc<R>,
        config: &Config,
        reports: mpsc::UnboundedSender<FlushReport>,
    ) -> Self {
        Self::build(repository, config, Some(reports))
    }

    fn build(
        repository: Arc<R>,
        config: &Config,
        reports: Option<mpsc::UnboundedSender<FlushReport>>,
    ) -> Self {
        let (delete_tx, delete_rx) = mpsc::channel(config.delete_queue_capacity);

        let worker_config = DeletionWorkerConfig {
            batch_limit: config.delete_batch_limit,
            flush_interval: Duration::from_secs(config.delete_flush_interval_secs),
        };
        let worker = tokio::spawn(run_deletion_worker(
            delete_rx,
            repository.clone(),
            worker_config,
            reports,
        ));

        Self {
            allocator: IdAllocator::new(repository.clone(), config.id_max_attempts),
            repository,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            delete_tx: Mutex::new(Some(delete_tx)),
            worker: Mutex::new(Some(worker)),
        }
    }

    /// Shortens `original_url` for `owner_id` and returns the full short URL.
    ///
    /// The URL is normalized before storage so equivalent spellings map to
    /// the same record.
    ///
    /// # Errors
    ///
    /// Returns [`ShortenerError::Validation`] for malformed URLs,
    /// [`ShortenerError::UrlConflict`] when the URL is already shortened
    /// (resolvable via [`Self::lookup_by_original_url`]), and
    /// [`ShortenerError::ExhaustedNamespace`] when no free identifier was
    /// found within the configured attempt bound.
    pub async fn allocate(
        &self,
        original_url: &str,
        owner_id: &str,
        length: usize,
    ) -> Result<String, ShortenerError> {
        let normalized = normalize_url(original_url).map_err(|e| ShortenerError::Validation {
            message: e.to_string(),
        })?;

        let id = self.allocator.allocate(&normalized, owner_id, length).await?;

        tracing::info!(id = %id, owner_id, "short link allocated");
        Ok(self.short_url(&id))
    }

    /// Retrieves the record behind a short identifier.
    ///
    /// # Errors
    ///
    /// [`ShortenerError::NotFound`] and [`ShortenerError::Deleted`] stay
    /// distinct so the transport layer can answer 404 versus 410.
    pub async fn lookup_by_id(&self, id: &str) -> Result<ShortLink, ShortenerError> {
        self.repository.get_by_id(id).await
    }

    /// Returns the full short URL already assigned to an original URL, if any.
    pub async fn lookup_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<String>, ShortenerError> {
        let normalized = normalize_url(original_url).map_err(|e| ShortenerError::Validation {
            message: e.to_string(),
        })?;

        Ok(self
            .repository
            .get_by_original_url(&normalized)
            .await?
            .map(|id| self.short_url(&id)))
    }

    /// Inserts a batch of caller-correlated mappings.
    ///
    /// Entries with a blank correlation id or URL are dropped before the
    /// batch reaches storage; one [`BulkResult`] is echoed per accepted
    /// entry. An entirely-filtered batch performs no storage call.
    pub async fn bulk_insert(
        &self,
        mappings: Vec<BulkMapping>,
        owner_id: &str,
    ) -> Result<Vec<BulkResult>, ShortenerError> {
        let accepted: Vec<BulkMapping> = mappings
            .into_iter()
            .filter(|m| !m.correlation_id.trim().is_empty() && !m.original_url.trim().is_empty())
            .collect();

        if accepted.is_empty() {
            return Ok(Vec::new());
        }

        self.repository.bulk_insert(&accepted, owner_id).await?;

        Ok(accepted
            .into_iter()
            .map(|m| BulkResult {
                short_url: self.short_url(&m.correlation_id),
                correlation_id: m.correlation_id,
            })
            .collect())
    }

    /// Lists the live links belonging to an owner.
    pub async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<OwnerLink>, ShortenerError> {
        let records = self.repository.list_by_owner(owner_id).await?;

        Ok(records
            .into_iter()
            .map(|r| OwnerLink {
                short_url: self.short_url(&r.id),
                original_url: r.original_url,
            })
            .collect())
    }

    /// Hands deletion requests to the intake channel without waiting for
    /// persistence.
    ///
    /// A detached task pushes the items in caller order; if the channel is
    /// full, that task (not the caller) blocks. No error reaches the
    /// caller: flush failures surface only through the worker's logging,
    /// metrics, and the optional flush-report channel. Items scheduled
    /// after [`Self::stop`] are dropped with a warning.
    pub async fn schedule(&self, items: Vec<DeletionRequest>) {
        if items.is_empty() {
            return;
        }

        let tx = self.delete_tx.lock().await.as_ref().cloned();
        let Some(tx) = tx else {
            counter!("linkcut_deletions_dropped_total").increment(items.len() as u64);
            tracing::warn!(
                count = items.len(),
                "deletion scheduled after shutdown, dropping items"
            );
            return;
        };

        tokio::spawn(async move {
            for item in items {
                if tx.send(item).await.is_err() {
                    tracing::warn!("deletion intake channel closed, dropping remaining items");
                    break;
                }
            }
        });
    }

    /// Checks storage reachability.
    pub async fn health_check(&self) -> Result<(), ShortenerError> {
        self.repository.health_check().await
    }

    /// Returns aggregate link and owner counts.
    pub async fn stats(&self) -> Result<StorageStats, ShortenerError> {
        self.repository.stats().await
    }

    /// Closes the deletion intake channel and waits for the worker to drain
    /// and terminate.
    ///
    /// Pushers already in flight finish first; the worker then performs its
    /// final flush. Safe to call more than once, including concurrently:
    /// every call returns only after the drain has finished.
    pub async fn stop(&self) {
        // The worker lock is held across take-and-join so a concurrent
        // caller blocks here until the first caller has joined the worker.
        let mut worker = self.worker.lock().await;

        let _ = self.delete_tx.lock().await.take();

        if let Some(handle) = worker.take() {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "deletion worker task failed");
            }
        }
    }

    fn short_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }
}
