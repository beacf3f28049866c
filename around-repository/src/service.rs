//! Post store service implementation.
//!
//! This module provides the main service for interacting with the document
//! store. Request handlers use this to publish posts and search for nearby ones.

use std::sync::Arc;

use around_shared::{GeoQuery, Post, SearchOutcome};
use uuid::Uuid;

use crate::errors::StoreError;
use crate::interfaces::PostStoreProvider;
use crate::types::IndexPostRequest;

/// The main service for interacting with the document store.
///
/// This is the high-level API that application code should use. It assigns
/// document ids, validates queries, and delegates to a `PostStoreProvider` for
/// the actual backend operations.
///
/// The service is cheap to clone; clones share the same provider.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use std::time::Duration;
/// use around_repository::PostStoreService;
/// use around_repository::opensearch::{IndexConfig, OpenSearchProvider};
/// use around_shared::{Location, Post};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let provider = OpenSearchProvider::new(
///     "http://localhost:9200",
///     IndexConfig::default(),
///     Duration::from_secs(10),
/// )?;
/// let service = PostStoreService::new(Arc::new(provider));
/// service.bootstrap().await?;
///
/// let id = service
///     .publish(Post::new("alice", "hello world", Location::new(37.0, -122.0)))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PostStoreService {
    provider: Arc<dyn PostStoreProvider>,
}

impl PostStoreService {
    /// Create a new PostStoreService.
    ///
    /// # Arguments
    ///
    /// * `provider` - A shared implementation of `PostStoreProvider` (e.g., `OpenSearchProvider`)
    pub fn new(provider: Arc<dyn PostStoreProvider>) -> Self {
        Self { provider }
    }

    /// Make sure the index exists with its geo point mapping.
    ///
    /// Intended to run once at startup; callers treat an error as fatal.
    pub async fn bootstrap(&self) -> Result<(), StoreError> {
        self.provider.ensure_index_exists().await
    }

    /// Store a post under a freshly generated id.
    ///
    /// The write is refreshed, so a search issued after this returns sees it.
    ///
    /// # Returns
    ///
    /// * `Ok(Uuid)` - The id the post was stored under
    /// * `Err(StoreError)` - If the store rejected or failed the write
    pub async fn publish(&self, post: Post) -> Result<Uuid, StoreError> {
        let request = IndexPostRequest::new(post);
        self.provider.index_post(&request).await?;
        Ok(request.id)
    }

    /// Find posts within the query radius.
    ///
    /// # Returns
    ///
    /// * `Ok(SearchOutcome)` - Matching posts in store order
    /// * `Err(StoreError::ValidationError)` - If the radius is negative or not finite
    /// * `Err(StoreError)` - If the search fails
    pub async fn nearby(&self, query: &GeoQuery) -> Result<SearchOutcome, StoreError> {
        query.validate().map_err(StoreError::validation)?;
        self.provider.search_nearby(query).await
    }
}
