//! Client-side accumulation of fetched pages.
//!
//! A [`PostFeed`] walks the post feed forward (toward older posts) and
//! appends each page. A [`CommentWindow`] walks a post's comments backward
//! and prepends each page, so its flattened view stays oldest to newest.
//! A [`WriteReconciler`] commits a new comment and resets the affected
//! window so the next read reflects it.
//!
//! Each feed allows at most one fetch in flight. A second request while one
//! is outstanding is rejected with [`LoadOutcome::InFlight`], not queued.
//! Dropping a pending fetch (for example when the observer goes away)
//! leaves the accumulated pages untouched.

mod comments;
mod pager;
mod posts;
mod reconcile;

pub use comments::CommentWindow;
pub use posts::PostFeed;
pub use reconcile::{Draft, WriteReconciler};

/// Result of asking a feed for another page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A page with this many items was fetched and stored.
    Loaded(usize),
    /// Nothing left to fetch; no request was made.
    Exhausted,
    /// Another fetch is outstanding; no request was made.
    InFlight,
    /// The fetch completed after the feed was reset and was thrown away.
    Discarded,
    /// The trigger did not ask for a page.
    Idle,
}

impl LoadOutcome {
    /// Returns true if a page was added to the feed.
    pub fn is_loaded(self) -> bool {
        matches!(self, LoadOutcome::Loaded(_))
    }
}
