//! Forward-walking post feed.

use tracing::{debug, instrument};

use super::LoadOutcome;
use super::pager::{Growth, Pager, Start};
use crate::Result;
use crate::model::{Post, PostPage};
use crate::traits::{FeedApi, PostsQuery};
use crate::types::Limit;

/// Client-held accumulation of post pages for infinite scrolling.
///
/// Pages are appended in fetch order. Since each page is newest first and
/// every page is older than the one before it, [`PostFeed::flatten`] is
/// globally newest first without any re-sorting.
#[derive(Debug)]
pub struct PostFeed<A> {
    api: A,
    limit: Limit,
    pager: Pager<PostPage>,
}

impl<A: FeedApi> PostFeed<A> {
    /// Create an empty feed. The first [`load_more`](Self::load_more)
    /// fetches the newest page.
    pub fn new(api: A, limit: Limit) -> Self {
        Self {
            api,
            limit,
            pager: Pager::new(Growth::Append),
        }
    }

    /// Seed the feed with a first page fetched out of band (e.g. prefetched
    /// while rendering), so no round trip is needed to show it.
    pub fn initialize(&self, first_page: PostPage) {
        self.pager.seed(first_page);
    }

    /// Fetch and append the next page.
    ///
    /// Does nothing if the feed is exhausted or a fetch is already
    /// outstanding. On error the feed keeps its previous pages.
    #[instrument(skip(self), fields(limit = %self.limit))]
    pub async fn load_more(&self) -> Result<LoadOutcome> {
        let (slot, cursor) = match self.pager.start() {
            Start::Fetch(slot, cursor) => (slot, cursor),
            Start::Busy => return Ok(LoadOutcome::InFlight),
            Start::Exhausted => return Ok(LoadOutcome::Exhausted),
        };

        let page = self
            .api
            .get_posts(PostsQuery::first(self.limit).after(cursor))
            .await?;
        let count = page.items.len();

        if !slot.commit(page) {
            debug!("Feed was reset during fetch, dropping page");
            return Ok(LoadOutcome::Discarded);
        }
        Ok(LoadOutcome::Loaded(count))
    }

    /// React to a proximity signal from the view (e.g. the end-of-list
    /// sentinel became visible). Repeated signals while a fetch is
    /// outstanding do not issue extra requests.
    pub async fn on_proximity(&self, near_end: bool) -> Result<LoadOutcome> {
        if !near_end {
            return Ok(LoadOutcome::Idle);
        }
        self.load_more().await
    }

    /// All loaded posts, newest first.
    pub fn flatten(&self) -> Vec<Post> {
        self.pager.flatten()
    }

    /// Returns true while the feed may hold further pages.
    pub fn has_more(&self) -> bool {
        self.pager.has_more()
    }

    /// Returns true while a fetch is outstanding.
    pub fn is_fetching(&self) -> bool {
        self.pager.is_fetching()
    }

    /// Number of pages held.
    pub fn page_count(&self) -> usize {
        self.pager.page_count()
    }

    /// Page size used for every fetch.
    pub fn limit(&self) -> Limit {
        self.limit
    }
}
