//! In-memory storage port implementation.
//!
//! Backs unit and integration tests and small single-process deployments.
//! File-backed and relational adapters live outside this crate.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::deletion_request::DeletionRequest;
use crate::domain::entities::{BulkMapping, ShortLink};
use crate::domain::repositories::{ShortenerRepository, StorageStats};
use crate::error::ShortenerError;

#[derive(Debug, Default)]
struct Store {
    /// Records keyed by short identifier. Soft-deleted records stay here.
    links: HashMap<String, ShortLink>,
    /// Uniqueness index: original URL -> short identifier.
    by_url: HashMap<String, String>,
}

/// Map-backed [`ShortenerRepository`] with the same uniqueness guarantees a
/// relational adapter would enforce via constraints.
///
/// Both maps are guarded by one `RwLock`, so every operation observes a
/// consistent snapshot and writes are atomic across the record map and the
/// URL index.
#[derive(Debug, Default)]
pub struct InMemoryShortenerRepository {
    store: RwLock<Store>,
}

impl InMemoryShortenerRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShortenerRepository for InMemoryShortenerRepository {
    async fn get_by_id(&self, id: &str) -> Result<ShortLink, ShortenerError> {
        let store = self.store.read().await;

        match store.links.get(id) {
            None => Err(ShortenerError::NotFound { id: id.to_string() }),
            Some(link) if link.is_deleted() => {
                Err(ShortenerError::Deleted { id: id.to_string() })
            }
            Some(link) => Ok(link.clone()),
        }
    }

    async fn get_by_original_url(&self, url: &str) -> Result<Option<String>, ShortenerError> {
        let store = self.store.read().await;
        Ok(store.by_url.get(url).cloned())
    }

    async fn reserve_id(
        &self,
        id: &str,
        url: &str,
        owner_id: &str,
    ) -> Result<(), ShortenerError> {
        let mut store = self.store.write().await;

        if store.links.contains_key(id) {
            return Err(ShortenerError::IdConflict { id: id.to_string() });
        }
        if store.by_url.contains_key(url) {
            return Err(ShortenerError::UrlConflict {
                original_url: url.to_string(),
            });
        }

        store
            .links
            .insert(id.to_string(), ShortLink::new(id, url, owner_id));
        store.by_url.insert(url.to_string(), id.to_string());
        Ok(())
    }

    async fn bulk_insert(
        &self,
        mappings: &[BulkMapping],
        owner_id: &str,
    ) -> Result<(), ShortenerError> {
        let mut store = self.store.write().await;

        // Validate the whole batch before touching state: all-or-nothing.
        // Duplicates within the batch itself conflict just like duplicates
        // against the store.
        let mut batch_ids = HashSet::new();
        let mut batch_urls = HashSet::new();
        for mapping in mappings {
            if store.links.contains_key(&mapping.correlation_id)
                || !batch_ids.insert(mapping.correlation_id.as_str())
            {
                return Err(ShortenerError::IdConflict {
                    id: mapping.correlation_id.clone(),
                });
            }
            if store.by_url.contains_key(&mapping.original_url)
                || !batch_urls.insert(mapping.original_url.as_str())
            {
                return Err(ShortenerError::UrlConflict {
                    original_url: mapping.original_url.clone(),
                });
            }
        }

        for mapping in mappings {
            store.links.insert(
                mapping.correlation_id.clone(),
                ShortLink::new(&mapping.correlation_id, &mapping.original_url, owner_id),
            );
            store
                .by_url
                .insert(mapping.original_url.clone(), mapping.correlation_id.clone());
        }
        Ok(())
    }

    async fn bulk_soft_delete(&self, items: &[DeletionRequest]) -> Result<(), ShortenerError> {
        let mut store = self.store.write().await;
        let now = Utc::now();

        for item in items {
            if let Some(link) = store.links.get_mut(&item.short_id) {
                // Owner scoping: foreign links are silently skipped.
                if link.owner_id == item.owner_id && !link.is_deleted() {
                    link.deleted_at = Some(now);
                }
            }
        }
        Ok(())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<ShortLink>, ShortenerError> {
        let store = self.store.read().await;

        let mut links: Vec<ShortLink> = store
            .links
            .values()
            .filter(|l| l.owner_id == owner_id && !l.is_deleted())
            .cloned()
            .collect();
        links.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(links)
    }

    async fn health_check(&self) -> Result<(), ShortenerError> {
        Ok(())
    }

    async fn stats(&self) -> Result<StorageStats, ShortenerError> {
        let store = self.store.read().await;

        let live = store.links.values().filter(|l| !l.is_deleted());
        let mut owners = HashSet::new();
        let mut urls = 0u64;
        for link in live {
            urls += 1;
            owners.insert(link.owner_id.as_str());
        }

        Ok(StorageStats {
            urls,
            users: owners.len() as u64,
        })
    }
}
