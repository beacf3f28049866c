//! OpenSearch implementation of the post store provider.
//!
//! This module provides a concrete implementation of `PostStoreProvider`
//! using OpenSearch as the backend.

mod index_config;
mod provider;
mod query;

pub use index_config::{
    get_index_settings, IndexConfig, DEFAULT_DOCUMENT_TYPE, DEFAULT_INDEX_NAME,
    DEFAULT_MAX_RESULTS, DOCUMENT_TYPE_FIELD,
};
pub use provider::OpenSearchProvider;
pub use query::{build_geo_distance_query, decode_search_response};
