//! # Around Shared
//!
//! This crate defines the data structures shared by the around service and its
//! document store client: the post model, geo queries and search outcomes.

pub mod types;

pub use types::geo_query::{GeoQuery, DEFAULT_DISTANCE_KM};
pub use types::post::{Location, Post};
pub use types::search_outcome::SearchOutcome;
