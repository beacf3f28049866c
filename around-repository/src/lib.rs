//! # Around Repository
//!
//! This crate provides traits and implementations for interacting with the
//! document store that holds posts. It includes definitions for errors,
//! interfaces, and a concrete implementation for OpenSearch.

pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod service;
pub mod types;

pub use errors::StoreError;
pub use interfaces::PostStoreProvider;
pub use opensearch::{IndexConfig, OpenSearchProvider};
pub use service::PostStoreService;
pub use types::IndexPostRequest;
