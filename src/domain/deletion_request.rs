//! Deletion request payload for the asynchronous deletion pipeline.

use serde::{Deserialize, Serialize};

/// A single tenant-scoped deletion request.
///
/// Created by a caller, handed to the intake channel by
/// [`crate::application::services::ShortenerService::schedule`], and consumed
/// exactly once by [`crate::domain::deletion_worker::run_deletion_worker`].
/// The `owner_id` scopes the soft delete: a request only affects links that
/// belong to that owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionRequest {
    pub short_id: String,
    pub owner_id: String,
}

impl DeletionRequest {
    /// Creates a new deletion request.
    pub fn new(short_id: impl Into<String>, owner_id: impl Into<String>) -> Self {
        Self {
            short_id: short_id.into(),
            owner_id: owner_id.into(),
        }
    }
}
