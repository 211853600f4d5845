//! Collection store port
//!
//! The persistence collaborator that receives imported collections.

use async_trait::async_trait;
use waypost_domain::RequestCollection;

/// Errors reported by a collection store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Collection not found.
    #[error("Collection not found: {0}")]
    NotFound(String),

    /// The backing store rejected the operation.
    #[error("Store error: {0}")]
    Backend(String),
}

/// Repository trait for canonical collection persistence.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Saves a collection, returning the stored tree.
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the backend fails.
    async fn save(&self, collection: RequestCollection) -> Result<RequestCollection, StoreError>;

    /// Loads a collection by id.
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` if no collection has this id.
    async fn load(&self, id: &str) -> Result<RequestCollection, StoreError>;

    /// Lists stored collections as `(id, name)` pairs, sorted by name.
    ///
    /// # Errors
    /// Returns a [`StoreError`] if the backend fails.
    async fn list(&self) -> Result<Vec<(String, String)>, StoreError>;
}
