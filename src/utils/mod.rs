//! Shared utilities: identifier generation and URL normalization.

pub mod short_id;
pub mod url_normalizer;

pub use short_id::generate_short_id;
pub use url_normalizer::normalize_url;
