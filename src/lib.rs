//! # linkcut
//!
//! Service-layer core for a URL-shortening service: collision-free short
//! identifier allocation and an asynchronous, batched deletion pipeline.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, the storage port trait, and
//!   the batch-collecting deletion worker
//! - **Application Layer** ([`application`]) - The ID allocator and the
//!   service facade
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory storage
//!   adapter
//!
//! HTTP transport, identity derivation, and durable storage adapters are
//! external collaborators: the transport layer calls
//! [`application::services::ShortenerService`], and adapters implement
//! [`domain::repositories::ShortenerRepository`].
//!
//! ## Concurrency model
//!
//! - `allocate` serializes generate-and-reserve under one process-wide lock,
//!   so no two concurrent calls can ever receive the same identifier.
//! - `schedule` is fire-and-forget: a detached task feeds a bounded intake
//!   channel and a single worker flushes batches to storage by size
//!   threshold or timer. Delivery to storage is at-most-once.
//! - `stop` closes the intake channel and waits for the worker's final
//!   flush; it must be called before process exit.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use linkcut::config;
//! use linkcut::infrastructure::persistence::InMemoryShortenerRepository;
//! use linkcut::prelude::*;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let cfg = config::load_from_env()?;
//! let repository = Arc::new(InMemoryShortenerRepository::new());
//! let service = ShortenerService::new(repository, &cfg);
//!
//! let short_url = service
//!     .allocate("https://example.com/some/long/path", "user-1", cfg.id_length)
//!     .await?;
//!
//! service.stop().await;
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod utils;

pub use error::ShortenerError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{IdAllocator, ShortenerService};
    pub use crate::config::Config;
    pub use crate::domain::deletion_request::DeletionRequest;
    pub use crate::domain::deletion_worker::FlushReport;
    pub use crate::domain::entities::{BulkMapping, BulkResult, OwnerLink, ShortLink};
    pub use crate::domain::repositories::{ShortenerRepository, StorageStats};
    pub use crate::error::ShortenerError;
}
