//! Storage port implementations.
//!
//! Only the in-memory adapter ships with this crate; durable adapters are
//! external collaborators that implement
//! [`crate::domain::repositories::ShortenerRepository`].

pub mod memory_repository;

pub use memory_repository::InMemoryShortenerRepository;
