//! Post types for the document store.
//!
//! This module defines the message structure that clients submit and that is
//! stored in the search engine.

use serde::{Deserialize, Serialize};

/// A geographic coordinate.
///
/// Serialized as `{"lat": .., "lon": ..}`, which is one of the object forms the
/// search engine accepts for a `geo_point` field. Values are not range checked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A location-tagged message.
///
/// This is both the ingest payload and the shape returned by searches. The
/// generated document id is kept out of this struct: it is assigned at write
/// time and never echoed back to search clients.
///
/// # Fields
///
/// - `author`: Identifier of the poster (`user` on the wire)
/// - `text`: Free-form message content (`message` on the wire)
/// - `location`: Where the message was posted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Post {
    #[serde(rename = "user")]
    pub author: String,
    #[serde(rename = "message")]
    pub text: String,
    pub location: Location,
}

impl Post {
    /// Create a new post.
    ///
    /// # Example
    ///
    /// ```
    /// use around_shared::{Location, Post};
    ///
    /// let post = Post::new("alice", "hello world", Location::new(37.0, -122.0));
    /// assert_eq!(post.author, "alice");
    /// ```
    pub fn new(author: impl Into<String>, text: impl Into<String>, location: Location) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
            location,
        }
    }
}
