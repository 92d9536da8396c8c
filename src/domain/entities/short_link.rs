//! Short link record, the primary persisted entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored mapping from a short identifier to an original URL.
///
/// Records are never physically removed; deletion flips `deleted_at` so
/// lookups can distinguish "never existed" from "deleted".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortLink {
    pub id: String,
    pub original_url: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ShortLink {
    /// Creates a live (non-deleted) record stamped with the current time.
    pub fn new(
        id: impl Into<String>,
        original_url: impl Into<String>,
        owner_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            original_url: original_url.into(),
            owner_id: owner_id.into(),
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    /// Returns true if the record has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
