//! Feed records and pages.
//!
//! Records are owned by the store; everything here is a read-only copy.

mod item;
mod page;

pub use item::{Author, Comment, NewPost, Post};
pub use page::{CommentPage, PostPage};
