//! Backward-walking comment window.

use tracing::{debug, instrument};

use super::LoadOutcome;
use super::pager::{Growth, Pager, Start};
use crate::Result;
use crate::model::{Comment, CommentPage};
use crate::traits::{CommentsQuery, FeedApi};
use crate::types::{Limit, PostId};

/// The loaded comments of one post, oldest to newest.
///
/// The first load fetches the most recent comments; every further load
/// fetches the batch just before the oldest one held and puts it in front.
/// Each fetched page is already chronological, so the flattened view is
/// non-decreasing by identifier after any number of loads.
#[derive(Debug)]
pub struct CommentWindow<A> {
    api: A,
    post_id: PostId,
    limit: Limit,
    pager: Pager<CommentPage>,
}

impl<A: FeedApi> CommentWindow<A> {
    /// Create an empty window over the comments of `post_id`.
    pub fn new(api: A, post_id: PostId, limit: Limit) -> Self {
        Self {
            api,
            post_id,
            limit,
            pager: Pager::new(Growth::Prepend),
        }
    }

    /// Load the next batch of older comments, or the most recent batch if
    /// nothing is loaded yet.
    #[instrument(skip(self), fields(post_id = %self.post_id, limit = %self.limit))]
    pub async fn load_older(&self) -> Result<LoadOutcome> {
        let (slot, cursor) = match self.pager.start() {
            Start::Fetch(slot, cursor) => (slot, cursor),
            Start::Busy => return Ok(LoadOutcome::InFlight),
            Start::Exhausted => return Ok(LoadOutcome::Exhausted),
        };

        let page = self
            .api
            .get_comments(CommentsQuery::latest(self.post_id, self.limit).before(cursor))
            .await?;
        let count = page.items.len();

        if !slot.commit(page) {
            debug!("Window was invalidated during fetch, dropping page");
            return Ok(LoadOutcome::Discarded);
        }
        Ok(LoadOutcome::Loaded(count))
    }

    /// Drop every loaded page. The next load starts again from the most
    /// recent comment; a fetch still outstanding will be discarded.
    pub fn invalidate(&self) {
        debug!(post_id = %self.post_id, "Invalidating comment window");
        self.pager.reset();
    }

    /// Invalidate and fetch the most recent page again.
    pub async fn refresh(&self) -> Result<LoadOutcome> {
        self.invalidate();
        self.load_older().await
    }

    /// Returns true after an invalidation until a fresh page is loaded.
    pub fn needs_refresh(&self) -> bool {
        self.pager.is_stale()
    }

    /// Loaded comments, oldest first.
    pub fn comments(&self) -> Vec<Comment> {
        self.pager.flatten()
    }

    /// Returns true while older comments may remain.
    pub fn has_older(&self) -> bool {
        self.pager.has_more()
    }

    /// Returns true while a fetch is outstanding.
    pub fn is_fetching(&self) -> bool {
        self.pager.is_fetching()
    }

    /// The post this window shows.
    pub fn post_id(&self) -> PostId {
        self.post_id
    }

    pub(crate) fn api(&self) -> &A {
        &self.api
    }
}
