//! Query/mutation service over a feed store.

use async_trait::async_trait;
use tracing::{debug, error, instrument};

use crate::Result;
use crate::error::{Error, InvalidArgumentError};
use crate::model::{Comment, CommentPage, PostPage};
use crate::pagination;
use crate::traits::{CommentsQuery, FeedApi, FeedStore, PostsQuery};
use crate::types::PostId;

/// Message reported to callers when a comment could not be stored.
const WRITE_FAILED_MESSAGE: &str = "failed to add comment, please try again later";

/// Serves the feed API from a [`FeedStore`].
///
/// Arguments are validated before the store is touched. Store failures on
/// the write path are logged and reported as [`Error::WriteFailed`].
#[derive(Debug, Clone)]
pub struct FeedService<S> {
    store: S,
}

impl<S: FeedStore> FeedService<S> {
    /// Create a service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Access the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Validate comment content, returning it unchanged if it has any
/// non-whitespace character.
pub fn validate_content(content: &str) -> Result<&str> {
    if content.trim().is_empty() {
        return Err(InvalidArgumentError::EmptyContent.into());
    }
    Ok(content)
}

#[async_trait]
impl<S: FeedStore> FeedApi for FeedService<S> {
    async fn get_posts(&self, query: PostsQuery) -> Result<PostPage> {
        pagination::fetch_posts(&self.store, query.cursor, query.limit).await
    }

    async fn get_comments(&self, query: CommentsQuery) -> Result<CommentPage> {
        pagination::fetch_comments(&self.store, query.post_id, query.cursor, query.limit).await
    }

    #[instrument(skip(self, content))]
    async fn add_comment(&self, post_id: PostId, content: &str) -> Result<Comment> {
        let content = validate_content(content)?;

        match self.store.create_comment(post_id, content).await {
            Ok(comment) => {
                debug!(comment_id = %comment.id, "Comment added");
                Ok(comment)
            }
            Err(e) => {
                error!(error = %e, "Failed to create comment");
                Err(Error::write_failed(WRITE_FAILED_MESSAGE))
            }
        }
    }
}
