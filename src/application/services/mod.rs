//! Business logic services for the application layer.

pub mod id_allocator;
pub mod shortener_service;

pub use id_allocator::IdAllocator;
pub use shortener_service::ShortenerService;
