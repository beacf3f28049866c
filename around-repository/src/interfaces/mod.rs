//! Interface definitions for the document store.
//!
//! This module defines the abstract `PostStoreProvider` trait that allows
//! for dependency injection and swappable store implementations.

mod post_store_provider;

pub use post_store_provider::PostStoreProvider;
