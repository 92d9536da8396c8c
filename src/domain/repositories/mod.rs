//! Repository trait definitions for the domain layer.
//!
//! The single trait here is the storage port the service core depends on.
//! Concrete adapters live in `crate::infrastructure::persistence`; a mock
//! implementation is auto-generated via `mockall` for unit tests.

pub mod shortener_repository;

pub use shortener_repository::{ShortenerRepository, StorageStats};

#[cfg(test)]
pub use shortener_repository::MockShortenerRepository;
