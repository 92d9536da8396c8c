//! Error taxonomy for the shortener service core.
//!
//! Callers in the transport layer map these variants onto response codes:
//! [`ShortenerError::NotFound`] and [`ShortenerError::Deleted`] are kept
//! distinct so a redirect handler can answer 404 versus 410, and the two
//! conflict variants are kept distinct so the allocator knows whether to
//! regenerate or to hand the conflict back to the caller.

use thiserror::Error;

/// Errors produced by the service core and the storage port.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortenerError {
    /// No record exists for the given short identifier.
    #[error("short link '{id}' not found")]
    NotFound { id: String },

    /// The record exists but has been soft-deleted.
    #[error("short link '{id}' has been deleted")]
    Deleted { id: String },

    /// The short identifier is already reserved for another URL.
    ///
    /// Recoverable inside the allocator by regenerating.
    #[error("short id '{id}' is already reserved")]
    IdConflict { id: String },

    /// The original URL already has a short identifier.
    ///
    /// Recoverable by the caller via
    /// [`lookup_by_original_url`](crate::application::services::ShortenerService::lookup_by_original_url).
    #[error("url '{original_url}' is already shortened")]
    UrlConflict { original_url: String },

    /// The allocator gave up after the configured number of reservation
    /// attempts all collided.
    #[error("no free short id found after {attempts} attempts")]
    ExhaustedNamespace { attempts: u32 },

    /// Input rejected before reaching storage (e.g. a malformed URL).
    #[error("validation failed: {message}")]
    Validation { message: String },

    /// The backing store failed for a reason other than a conflict.
    ///
    /// Never retried by this core; the current operation is aborted.
    #[error("storage unavailable: {message}")]
    Storage { message: String },
}

impl ShortenerError {
    /// Builds a [`ShortenerError::Storage`] from any displayable cause.
    pub fn storage(cause: impl std::fmt::Display) -> Self {
        Self::Storage {
            message: cause.to_string(),
        }
    }

    /// Returns true for either conflict variant.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::IdConflict { .. } | Self::UrlConflict { .. }
        )
    }
}
