//! Batch insertion records and per-owner listing rows.

use serde::{Deserialize, Serialize};

/// One entry of a batch shortening request.
///
/// The caller-supplied `correlation_id` doubles as the stored short
/// identifier for the bulk path and is echoed back in [`BulkResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkMapping {
    pub correlation_id: String,
    pub original_url: String,
}

/// Outcome of one accepted [`BulkMapping`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkResult {
    pub correlation_id: String,
    pub short_url: String,
}

/// One row of a per-owner link listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerLink {
    pub short_url: String,
    pub original_url: String,
}
