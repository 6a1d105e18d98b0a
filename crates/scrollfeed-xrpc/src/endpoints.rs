//! XRPC method names and wire bodies.

use serde::{Deserialize, Serialize};

use scrollfeed_core::types::{Cursor, PostId};

/// Query: a page of posts, newest first.
pub const GET_POSTS: &str = "feed.getPosts";

/// Query: a page of a post's comments, chronological.
pub const GET_COMMENTS: &str = "feed.getComments";

/// Procedure: add a comment to a post.
pub const ADD_COMMENT: &str = "feed.addComment";

/// Query parameters for `feed.getPosts`.
///
/// `limit` is carried raw so the server can reject out-of-range values
/// with its own error rather than a generic decoding failure.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPostsParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Cursor>,
}

/// Query parameters for `feed.getComments`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCommentsParams {
    pub post_id: PostId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cursor: Option<Cursor>,
}

/// Request body for `feed.addComment`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentInput {
    pub post_id: PostId,
    pub content: String,
}

/// Error body returned by every method on failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct XrpcErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
