//! Domain layer containing business entities and the storage port.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Storage port trait definition
//! - [`deletion_request`] - Deletion pipeline payload
//! - [`deletion_worker`] - Batch-collecting deletion worker
//!
//! # Deletion Flow
//!
//! 1. A caller hands [`deletion_request::DeletionRequest`]s to
//!    [`crate::application::services::ShortenerService::schedule`]
//! 2. A detached task pushes them onto the bounded intake channel
//! 3. [`deletion_worker::run_deletion_worker`] accumulates and flushes them
//!    in batches via [`repositories::ShortenerRepository::bulk_soft_delete`]

pub mod deletion_request;
pub mod deletion_worker;
pub mod entities;
pub mod repositories;
