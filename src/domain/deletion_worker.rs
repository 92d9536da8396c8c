//! Batch-collecting deletion worker.
//!
//! A single long-lived consumer drains the deletion intake channel,
//! accumulates requests in an in-memory buffer, and flushes them to the
//! storage port in one batch call. A flush fires when the buffer reaches
//! `batch_limit`, when the periodic ticker fires, or once on shutdown when
//! the intake channel closes.
//!
//! Delivery is at-most-once: a failed flush is logged and counted, the
//! buffer is treated as drained, and nothing is retried. Deletion is
//! idempotent and can be re-requested by the user, so this is an accepted
//! trade against unbounded memory growth. Callers that need confirmation can
//! attach a flush-report channel.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

use crate::domain::deletion_request::DeletionRequest;
use crate::domain::repositories::ShortenerRepository;
use crate::error::ShortenerError;

/// Tuning knobs for [`run_deletion_worker`].
#[derive(Debug, Clone)]
pub struct DeletionWorkerConfig {
    /// Buffer size that triggers an immediate flush.
    pub batch_limit: usize,
    /// Period of the timer-driven flush.
    pub flush_interval: Duration,
}

/// Outcome of one non-empty flush, delivered on the optional report channel.
#[derive(Debug, Clone)]
pub struct FlushReport {
    /// Number of requests in the flushed batch.
    pub count: usize,
    pub result: Result<(), ShortenerError>,
}

/// Runs the deletion worker until the intake channel closes.
///
/// Intended to be spawned once per service instance; the owning service
/// keeps the `JoinHandle` and awaits it on shutdown so the final flush is
/// guaranteed to have completed before the process exits.
///
/// Arrival order is preserved within a batch. The first timer tick fires one
/// full `flush_interval` after start.
pub async fn run_deletion_worker<R: ShortenerRepository + ?Sized>(
    mut rx: mpsc::Receiver<DeletionRequest>,
    repository: Arc<R>,
    config: DeletionWorkerConfig,
    reports: Option<mpsc::UnboundedSender<FlushReport>>,
) {
    let mut batch: Vec<DeletionRequest> = Vec::with_capacity(config.batch_limit);
    let mut ticker = tokio::time::interval_at(
        Instant::now() + config.flush_interval,
        config.flush_interval,
    );
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::debug!(
        batch_limit = config.batch_limit,
        flush_interval_ms = config.flush_interval.as_millis() as u64,
        "deletion worker started"
    );

    loop {
        tokio::select! {
            item = rx.recv() => match item {
                Some(request) => {
                    batch.push(request);
                    if batch.len() >= config.batch_limit {
                        flush(repository.as_ref(), &mut batch, reports.as_ref()).await;
                    }
                }
                None => {
                    // Intake channel closed: drain once and terminate.
                    flush(repository.as_ref(), &mut batch, reports.as_ref()).await;
                    tracing::debug!("deletion worker stopped");
                    return;
                }
            },
            _ = ticker.tick() => {
                flush(repository.as_ref(), &mut batch, reports.as_ref()).await;
            }
        }
    }
}

/// Writes the buffered batch to storage and clears the buffer.
///
/// An empty buffer is a no-op so timer ticks on an idle service cost no
/// storage round trip. The buffer is cleared even when the write fails.
async fn flush<R: ShortenerRepository + ?Sized>(
    repository: &R,
    batch: &mut Vec<DeletionRequest>,
    reports: Option<&mpsc::UnboundedSender<FlushReport>>,
) {
    if batch.is_empty() {
        return;
    }

    let count = batch.len();
    let result = repository.bulk_soft_delete(batch.as_slice()).await;

    match &result {
        Ok(()) => {
            counter!("linkcut_deletions_flushed_total").increment(count as u64);
            tracing::debug!(count, "flushed deletion batch");
        }
        Err(e) => {
            counter!("linkcut_deletion_flush_failures_total").increment(1);
            tracing::error!(count, error = %e, "deletion batch flush failed, dropping batch");
        }
    }

    if let Some(tx) = reports {
        let _ = tx.send(FlushReport { count, result });
    }

    batch.clear();
}
