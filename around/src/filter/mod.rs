//! Content filter for search results.
//!
//! A static substring denylist. Stands in for a real spam/abuse classifier.

use around_shared::Post;

/// Substrings that exclude a post from search results.
pub const FILTERED_WORDS: &[&str] = &["fuck", "100"];

/// Returns true if `text` contains any denylisted substring.
///
/// Matching is case-sensitive and not tokenized: "100" also matches "1000".
pub fn contains_filtered_words(text: &str) -> bool {
    FILTERED_WORDS.iter().any(|word| text.contains(word))
}

/// Drop posts whose text contains a denylisted substring, keeping order.
pub fn retain_clean(posts: Vec<Post>) -> Vec<Post> {
    posts
        .into_iter()
        .filter(|post| !contains_filtered_words(&post.text))
        .collect()
}
