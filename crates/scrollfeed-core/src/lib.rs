//! scrollfeed-core - Cursor pagination and client-side feed state.
//!
//! The server side of the protocol is [`FeedService`], which serves pages
//! from any [`FeedStore`]. The client side lives in [`feed`]: a
//! [`PostFeed`] accumulating forward pages, a [`CommentWindow`] walking
//! backward through a post's comments, and a [`WriteReconciler`] that
//! keeps a window consistent after a new comment is written.

pub mod error;
pub mod feed;
pub mod model;
pub mod pagination;
pub mod service;
pub mod store;
pub mod traits;
pub mod types;

pub use error::Error;
pub use feed::{CommentWindow, Draft, LoadOutcome, PostFeed, WriteReconciler};
pub use model::{Author, Comment, CommentPage, NewPost, Post, PostPage};
pub use service::FeedService;
pub use store::MemoryStore;
pub use traits::{CommentsQuery, FeedApi, FeedStore, PostsQuery};
pub use types::{CommentId, Cursor, FeedUrl, Limit, PostId};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
