//! This module defines the core data structures used across the service.
//! It re-exports the post model, the geo query and the search outcome.

pub mod geo_query;
pub mod post;
pub mod search_outcome;

pub use geo_query::GeoQuery;
pub use post::{Location, Post};
pub use search_outcome::SearchOutcome;
