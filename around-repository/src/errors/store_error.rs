//! Document store error types.
//!
//! This module defines the unified error type for all document store
//! operations, from transport failures to undecodable search responses.

use thiserror::Error;

/// Unified errors from document store operations.
///
/// Used by the `PostStoreProvider` trait and `PostStoreService`. The HTTP layer
/// maps `ValidationError` to a bad request, `Timeout` to a gateway timeout and
/// every other variant to a bad gateway; at startup any of them is fatal.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Validation error (e.g., a negative search radius, or a query the store
    /// rejected as malformed).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failed to establish or use the connection to the store.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The store did not answer within the configured timeout.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Failed to check for or create the index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Failed to index a document.
    #[error("Index error: {0}")]
    IndexError(String),

    /// The search request was rejected or failed.
    #[error("Search error: {0}")]
    SearchError(String),

    /// Failed to parse a response from the store.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize data for the store.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl StoreError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a timeout error.
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create an index error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::IndexError(msg.into())
    }

    /// Create a search error.
    pub fn search(msg: impl Into<String>) -> Self {
        Self::SearchError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Returns true if the store failed to answer in time.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

impl From<opensearch::Error> for StoreError {
    fn from(err: opensearch::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::ConnectionError(err.to_string())
        }
    }
}
