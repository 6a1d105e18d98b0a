//! Core feed types.
//!
//! These types enforce protocol invariants at construction time: a
//! [`Limit`] is always within range, a [`Cursor`] is never confused with
//! a plain identifier.

mod cursor;
mod feed_url;
mod ids;
mod limit;

pub use cursor::{Cursor, Positioned};
pub use feed_url::FeedUrl;
pub use ids::{CommentId, PostId};
pub use limit::Limit;
