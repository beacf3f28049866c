//! Search outcome types.
//!
//! This module defines what a geo search returns before content filtering.

use super::post::Post;

/// Decoded result of a geo-distance search.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchOutcome {
    /// Matching posts, in the order the search engine returned them.
    pub posts: Vec<Post>,

    /// Total number of matching documents.
    /// May be greater than `posts.len()` when the hit cap was reached.
    pub total: u64,

    /// Time taken by the search engine in milliseconds.
    pub took_ms: u64,
}

impl SearchOutcome {
    pub fn new(posts: Vec<Post>, total: u64, took_ms: u64) -> Self {
        Self {
            posts,
            total,
            took_ms,
        }
    }

    /// Returns true if there are no posts.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Returns the number of posts in this outcome.
    pub fn len(&self) -> usize {
        self.posts.len()
    }
}
