//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `PostStoreProvider`
//! using the OpenSearch Rust crate.

use std::time::Duration;

use around_shared::{GeoQuery, SearchOutcome};
use async_trait::async_trait;
use opensearch::{
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    params::Refresh,
    IndexParts, OpenSearch, SearchParts,
};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::errors::StoreError;
use crate::interfaces::PostStoreProvider;
use crate::opensearch::index_config::{get_index_settings, IndexConfig, DOCUMENT_TYPE_FIELD};
use crate::opensearch::query::{build_geo_distance_query, decode_search_response};
use crate::types::IndexPostRequest;

/// Error type the store reports when a concurrent bootstrap created the index first.
const ALREADY_EXISTS_ERROR: &str = "resource_already_exists_exception";

/// OpenSearch provider implementation.
///
/// Holds a single long-lived client; the underlying transport pools
/// connections and is safe to share across tasks.
///
/// # Example
///
/// ```ignore
/// use around_repository::opensearch::{IndexConfig, OpenSearchProvider};
/// use std::time::Duration;
///
/// let provider = OpenSearchProvider::new(
///     "http://localhost:9200",
///     IndexConfig::default(),
///     Duration::from_secs(10),
/// )?;
/// provider.ensure_index_exists().await?;
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
    index_config: IndexConfig,
}

impl OpenSearchProvider {
    /// Create a new OpenSearch provider for the specified URL.
    ///
    /// No request is sent; connectivity is first exercised by
    /// `ensure_index_exists`.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `index_config` - The index name, document type and hit cap
    /// * `timeout` - Upper bound on every request to the store
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(StoreError)` - If the URL is invalid or the transport cannot be built
    pub fn new(
        url: &str,
        index_config: IndexConfig,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let parsed_url = Url::parse(url).map_err(|e| StoreError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            index = %index_config.index_name,
            document_type = %index_config.document_type,
            timeout_secs = timeout.as_secs(),
            "Created OpenSearch provider"
        );

        Ok(Self {
            client,
            index_config,
        })
    }

    /// Build the stored document: the post plus the document type field.
    fn document_body(&self, request: &IndexPostRequest) -> Result<serde_json::Value, StoreError> {
        let mut doc = serde_json::to_value(&request.post)
            .map_err(|e| StoreError::serialization(e.to_string()))?;

        match doc.as_object_mut() {
            Some(fields) => {
                fields.insert(
                    DOCUMENT_TYPE_FIELD.to_string(),
                    serde_json::Value::String(self.index_config.document_type.clone()),
                );
                Ok(doc)
            }
            None => Err(StoreError::serialization(
                "Post did not serialize to a JSON object",
            )),
        }
    }
}

#[async_trait]
impl PostStoreProvider for OpenSearchProvider {
    async fn index_exists(&self) -> Result<bool, StoreError> {
        let index = self.index_config.index_name.as_str();
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await?;

        let status = response.status_code();
        match status.as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            _ => {
                let error_body = response.text().await.unwrap_or_default();
                error!(status = %status, body = %error_body, "Index existence check failed");
                Err(StoreError::index_creation(format!(
                    "Existence check failed with status {}: {}",
                    status, error_body
                )))
            }
        }
    }

    /// Create the index with the geo point mapping.
    ///
    /// Losing a creation race to another instance is not an error.
    async fn create_index(&self) -> Result<(), StoreError> {
        let index = self.index_config.index_name.as_str();
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(get_index_settings())
            .send()
            .await?;

        let status = response.status_code();
        if status.is_success() {
            info!(index = %index, "Created index with geo_point mapping");
            return Ok(());
        }

        let error_body = response.text().await.unwrap_or_default();
        if error_body.contains(ALREADY_EXISTS_ERROR) {
            info!(index = %index, "Index was created concurrently");
            return Ok(());
        }

        error!(status = %status, body = %error_body, "Index creation failed");
        Err(StoreError::index_creation(format!(
            "Index creation failed with status {}: {}",
            status, error_body
        )))
    }

    async fn index_post(&self, request: &IndexPostRequest) -> Result<(), StoreError> {
        let doc_id = request.document_id();
        let body = self.document_body(request)?;

        let response = self
            .client
            .index(IndexParts::IndexId(&self.index_config.index_name, &doc_id))
            .body(body)
            .refresh(Refresh::True)
            .send()
            .await?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index request failed");
            return Err(StoreError::index(format!(
                "Index failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(doc_id = %doc_id, "Post indexed");
        Ok(())
    }

    async fn search_nearby(&self, query: &GeoQuery) -> Result<SearchOutcome, StoreError> {
        let index = self.index_config.index_name.as_str();
        let body = build_geo_distance_query(
            query,
            &self.index_config.document_type,
            self.index_config.max_results,
        );

        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .body(body)
            .pretty(true)
            .send()
            .await?;

        let status = response.status_code();
        let response_body = response.text().await?;
        if status.as_u16() == 400 {
            warn!(body = %response_body, "Search query rejected by the store");
            return Err(StoreError::validation(format!(
                "Search query rejected: {}",
                response_body
            )));
        }
        if !status.is_success() {
            error!(status = %status, body = %response_body, "Search request failed");
            return Err(StoreError::search(format!(
                "Search failed with status {}: {}",
                status, response_body
            )));
        }

        let outcome = decode_search_response(&response_body)?;
        debug!(
            took_ms = outcome.took_ms,
            total = outcome.total,
            returned = outcome.len(),
            "Search completed"
        );
        Ok(outcome)
    }
}
