//! XRPC-backed feed API.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, instrument};

use scrollfeed_core::model::{Comment, CommentPage, PostPage};
use scrollfeed_core::traits::{CommentsQuery, FeedApi, PostsQuery};
use scrollfeed_core::types::{FeedUrl, PostId};
use scrollfeed_core::Result;

use crate::client::XrpcClient;
use crate::endpoints::*;

/// The feed API of a remote server.
#[derive(Debug, Clone)]
pub struct XrpcFeed {
    client: XrpcClient,
}

impl XrpcFeed {
    /// Connect to the feed server at `url`.
    pub fn new(url: FeedUrl) -> Result<Self> {
        Ok(Self {
            client: XrpcClient::new(url, None)?,
        })
    }

    /// Connect with a per-request timeout.
    pub fn with_timeout(url: FeedUrl, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: XrpcClient::new(url, Some(timeout))?,
        })
    }

    /// Returns the server URL.
    pub fn url(&self) -> &FeedUrl {
        self.client.base()
    }
}

#[async_trait]
impl FeedApi for XrpcFeed {
    #[instrument(skip(self))]
    async fn get_posts(&self, query: PostsQuery) -> Result<PostPage> {
        debug!("Fetching posts via XRPC");
        let params = GetPostsParams {
            limit: Some(query.limit.into()),
            cursor: query.cursor,
        };
        self.client.query(GET_POSTS, &params).await
    }

    #[instrument(skip(self))]
    async fn get_comments(&self, query: CommentsQuery) -> Result<CommentPage> {
        debug!("Fetching comments via XRPC");
        let params = GetCommentsParams {
            post_id: query.post_id,
            limit: Some(query.limit.into()),
            cursor: query.cursor,
        };
        self.client.query(GET_COMMENTS, &params).await
    }

    #[instrument(skip(self, content))]
    async fn add_comment(&self, post_id: PostId, content: &str) -> Result<Comment> {
        debug!("Adding comment via XRPC");
        let input = AddCommentInput {
            post_id,
            content: content.to_string(),
        };
        self.client.procedure(ADD_COMMENT, &input).await
    }
}
