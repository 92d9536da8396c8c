//! Core business data structures.

pub mod bulk;
pub mod short_link;

pub use bulk::{BulkMapping, BulkResult, OwnerLink};
pub use short_link::ShortLink;
