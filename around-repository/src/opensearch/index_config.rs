//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the post index.

use serde_json::{json, Value};

/// Default index name.
pub const DEFAULT_INDEX_NAME: &str = "around";

/// Default document type name.
pub const DEFAULT_DOCUMENT_TYPE: &str = "post";

/// Default cap on the number of hits a single search returns.
pub const DEFAULT_MAX_RESULTS: usize = 100;

/// Name of the keyword field holding the document type.
///
/// OpenSearch has no mapping types, so the configured type name is stored on
/// every document and matched by every search.
pub const DOCUMENT_TYPE_FIELD: &str = "post_type";

/// Configuration for the post index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexConfig {
    /// The index holding all posts.
    pub index_name: String,
    /// The document type name stored in [`DOCUMENT_TYPE_FIELD`].
    pub document_type: String,
    /// Maximum number of hits requested per search.
    pub max_results: usize,
}

impl IndexConfig {
    /// Create a new index configuration.
    ///
    /// # Arguments
    ///
    /// * `index_name` - The index name
    /// * `document_type` - The document type name
    pub fn new(index_name: impl Into<String>, document_type: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            document_type: document_type.into(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Set the per-search hit cap.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_NAME, DEFAULT_DOCUMENT_TYPE)
    }
}

/// Get the index settings and mappings for the post index.
///
/// The mapping includes:
/// - **geo_point**: `location`, required for geo-distance queries
/// - **Keyword fields**: `user` and the document type, for exact matching
/// - **text**: `message`
///
/// # Sharding Configuration
///
/// - 1 primary shard
/// - 1 replica for redundancy
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                "user": {
                    "type": "keyword"
                },
                "message": {
                    "type": "text"
                },
                "location": {
                    "type": "geo_point"
                },
                "post_type": {
                    "type": "keyword"
                }
            }
        }
    })
}
