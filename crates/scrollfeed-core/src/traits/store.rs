//! Backing store contract.

use async_trait::async_trait;

use crate::Result;
use crate::model::{Comment, Post};
use crate::types::PostId;

/// Read/write access to the relational store behind a feed.
///
/// Listings are newest-first and filtered to identifiers strictly below
/// `before` when it is given. Implementations must never expose a
/// half-written row to a concurrent reader.
#[async_trait]
pub trait FeedStore: Send + Sync {
    /// List up to `take` posts, newest first.
    async fn list_posts(&self, before: Option<i64>, take: usize) -> Result<Vec<Post>>;

    /// List up to `take` comments of `post_id`, newest first.
    ///
    /// A post that does not exist has no comments; this is not an error.
    async fn list_comments(
        &self,
        post_id: PostId,
        before: Option<i64>,
        take: usize,
    ) -> Result<Vec<Comment>>;

    /// Persist a new comment.
    ///
    /// The assigned identifier is strictly greater than every identifier
    /// handed out before it.
    async fn create_comment(&self, post_id: PostId, content: &str) -> Result<Comment>;
}
