//! # Around
//!
//! Location-tagged message service: clients post short messages with a
//! coordinate and search for messages posted nearby. Storage and geo queries
//! are delegated to OpenSearch.
//!
//! ## Architecture
//!
//! 1. **Bootstrap**: ensures the post index exists with a geo point mapping
//! 2. **Ingest**: `POST /post` stores a message under a fresh id
//! 3. **Search**: `GET /search` runs a geo-distance query and filters the hits
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`server`]: Router, request handlers and listener
//! - [`filter`]: Content denylist applied to search results
//! - [`errors`]: Error types for the handlers

pub mod config;
pub mod errors;
pub mod filter;
pub mod server;

pub use config::{Dependencies, ServiceConfig};
pub use errors::ApiError;

use around_repository::StoreError;
use thiserror::Error;

/// Errors that can occur during service startup or while serving.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The document store could not be reached or prepared at startup.
    #[error("Bootstrap error: {0}")]
    BootstrapError(#[from] StoreError),

    /// The HTTP listener failed.
    #[error("Server error: {0}")]
    ServerError(#[from] std::io::Error),
}

impl ServiceError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
