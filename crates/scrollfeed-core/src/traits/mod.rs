//! Seams between the pagination core and its collaborators.

mod api;
mod store;

pub use api::{CommentsQuery, FeedApi, PostsQuery};
pub use store::FeedStore;
