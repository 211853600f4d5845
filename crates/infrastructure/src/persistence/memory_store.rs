//! In-memory collection store.

use std::sync::Arc;

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use waypost_application::{CollectionStore, StoreError};
use waypost_domain::{RequestCollection, generate_id};

/// Thread-safe in-memory store keyed by collection id.
///
/// Saving a collection with an empty id assigns a fresh one; saving under an
/// existing id replaces the stored tree.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCollectionStore {
    collections: Arc<RwLock<IndexMap<String, RequestCollection>>>,
}

impl InMemoryCollectionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored collections.
    pub async fn len(&self) -> usize {
        self.collections.read().await.len()
    }

    /// Returns true if nothing has been saved.
    pub async fn is_empty(&self) -> bool {
        self.collections.read().await.is_empty()
    }
}

#[async_trait]
impl CollectionStore for InMemoryCollectionStore {
    async fn save(&self, mut collection: RequestCollection) -> Result<RequestCollection, StoreError> {
        if collection.id.is_empty() {
            collection.id = generate_id();
        }
        let mut collections = self.collections.write().await;
        collections.insert(collection.id.clone(), collection.clone());
        tracing::debug!(id = %collection.id, name = %collection.name, "stored collection");
        Ok(collection)
    }

    async fn load(&self, id: &str) -> Result<RequestCollection, StoreError> {
        let collections = self.collections.read().await;
        collections
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn list(&self) -> Result<Vec<(String, String)>, StoreError> {
        let collections = self.collections.read().await;
        let mut entries: Vec<(String, String)> = collections
            .values()
            .map(|c| (c.id.clone(), c.name.clone()))
            .collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        Ok(entries)
    }
}
