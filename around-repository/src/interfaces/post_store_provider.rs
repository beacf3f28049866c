//! Post store provider trait definition.
//!
//! This module defines the abstract interface for document store operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;
use around_shared::{GeoQuery, SearchOutcome};
use tracing::info;

use crate::errors::StoreError;
use crate::types::IndexPostRequest;

/// Abstracts the underlying document store (OpenSearch, Elasticsearch, etc.).
///
/// Implementations are shared across request handlers behind an `Arc`, so they
/// must be safe for concurrent use without extra locking. The store itself
/// serializes writes.
///
/// All methods return `Result<T, StoreError>` for consistent error handling
/// across different backend implementations.
///
/// # Index Initialization
///
/// Call `ensure_index_exists` once during application startup, before any
/// document is written or searched.
#[async_trait]
pub trait PostStoreProvider: Send + Sync {
    /// Check whether the configured index exists.
    async fn index_exists(&self) -> Result<bool, StoreError>;

    /// Create the configured index with a mapping that declares `location` as a
    /// geo point.
    async fn create_index(&self) -> Result<(), StoreError>;

    /// Ensure the index exists, creating it if necessary.
    ///
    /// Once the index exists this performs no creation call, so repeated runs
    /// are harmless.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the index is ready for use
    /// * `Err(StoreError)` - If the existence check or the creation fails
    async fn ensure_index_exists(&self) -> Result<(), StoreError> {
        if self.index_exists().await? {
            info!("Index already exists, skipping creation");
            return Ok(());
        }

        self.create_index().await?;
        info!("Index created");
        Ok(())
    }

    /// Store a post under the given id and refresh the index so the write is
    /// visible to the next search.
    ///
    /// # Arguments
    ///
    /// * `request` - The id and post to store
    async fn index_post(&self, request: &IndexPostRequest) -> Result<(), StoreError>;

    /// Run a geo-distance search and decode the hits.
    ///
    /// Posts are returned in the order the store produced them.
    async fn search_nearby(&self, query: &GeoQuery) -> Result<SearchOutcome, StoreError>;
}
