//! Request types for document store operations.

use around_shared::Post;
use uuid::Uuid;

/// Request to store a new post.
///
/// The `id` becomes the store document id. It is generated fresh for every
/// ingest and never reused, so indexing under it always creates a document.
#[derive(Debug, Clone)]
pub struct IndexPostRequest {
    /// The generated document id.
    pub id: Uuid,
    /// The post to store.
    pub post: Post,
}

impl IndexPostRequest {
    /// Create a request with a freshly generated id.
    pub fn new(post: Post) -> Self {
        Self {
            id: Uuid::new_v4(),
            post,
        }
    }

    /// The document id in the form used by the store.
    pub fn document_id(&self) -> String {
        self.id.to_string()
    }
}
