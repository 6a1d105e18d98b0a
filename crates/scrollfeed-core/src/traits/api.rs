//! Caller-facing query/mutation surface.

use async_trait::async_trait;

use crate::Result;
use crate::model::{Comment, CommentPage, PostPage};
use crate::types::{Cursor, Limit, PostId};

/// Parameters of a `getPosts` query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostsQuery {
    pub limit: Limit,
    pub cursor: Option<Cursor>,
}

impl PostsQuery {
    /// First page of the feed with the given page size.
    pub fn first(limit: Limit) -> Self {
        Self {
            limit,
            cursor: None,
        }
    }

    /// Continue from a cursor returned by a previous page.
    pub fn after(mut self, cursor: Option<Cursor>) -> Self {
        self.cursor = cursor;
        self
    }
}

/// Parameters of a `getComments` query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentsQuery {
    pub post_id: PostId,
    pub limit: Limit,
    pub cursor: Option<Cursor>,
}

impl CommentsQuery {
    /// Most recent comments of a post.
    pub fn latest(post_id: PostId, limit: Limit) -> Self {
        Self {
            post_id,
            limit,
            cursor: None,
        }
    }

    /// Continue from a `previousCursor` returned by a previous page.
    pub fn before(mut self, cursor: Option<Cursor>) -> Self {
        self.cursor = cursor;
        self
    }
}

/// The feed API as seen by a client.
///
/// Implemented in-process by [`FeedService`](crate::FeedService) and over
/// HTTP by the XRPC client.
#[async_trait]
pub trait FeedApi: Send + Sync {
    /// Fetch a page of posts, newest first.
    async fn get_posts(&self, query: PostsQuery) -> Result<PostPage>;

    /// Fetch a page of comments in chronological order.
    async fn get_comments(&self, query: CommentsQuery) -> Result<CommentPage>;

    /// Add a comment to a post.
    async fn add_comment(&self, post_id: PostId, content: &str) -> Result<Comment>;
}

#[async_trait]
impl<T: FeedApi + ?Sized> FeedApi for std::sync::Arc<T> {
    async fn get_posts(&self, query: PostsQuery) -> Result<PostPage> {
        (**self).get_posts(query).await
    }

    async fn get_comments(&self, query: CommentsQuery) -> Result<CommentPage> {
        (**self).get_comments(query).await
    }

    async fn add_comment(&self, post_id: PostId, content: &str) -> Result<Comment> {
        (**self).add_comment(post_id, content).await
    }
}

