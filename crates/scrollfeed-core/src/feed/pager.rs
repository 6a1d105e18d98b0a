//! Page accumulation with a single-fetch guard.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::model::{Comment, CommentPage, Post, PostPage};
use crate::types::Cursor;

/// A fetched page that knows where the walk continues.
pub(crate) trait Window {
    type Item: Clone;

    /// Cursor for the following page in the walk direction.
    fn outgoing(&self) -> Option<Cursor>;

    fn items(&self) -> &[Self::Item];
}

impl Window for PostPage {
    type Item = Post;

    fn outgoing(&self) -> Option<Cursor> {
        self.next_cursor
    }

    fn items(&self) -> &[Post] {
        &self.items
    }
}

impl Window for CommentPage {
    type Item = Comment;

    fn outgoing(&self) -> Option<Cursor> {
        self.previous_cursor
    }

    fn items(&self) -> &[Comment] {
        &self.items
    }
}

/// Where new pages go relative to the ones already held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Growth {
    /// Forward walk: new pages go after existing ones.
    Append,
    /// Backward walk: new pages go before existing ones.
    Prepend,
}

#[derive(Debug)]
struct State<P> {
    pages: VecDeque<P>,
    fetching: bool,
    /// Bumped on every reset; a fetch started under an older epoch is stale.
    epoch: u64,
    /// Set by `reset`, cleared once a fresh first page lands.
    stale: bool,
}

/// Decision taken when a fetch is requested.
pub(crate) enum Start<'a, P: Window> {
    /// Fetch from this cursor (`None` = from the unbounded start).
    Fetch(InFlight<'a, P>, Option<Cursor>),
    /// A fetch is already outstanding.
    Busy,
    /// The last page had no outgoing cursor.
    Exhausted,
}

/// Pages of one walk plus the "fetching" flag.
///
/// The mutex only guards short, synchronous state transitions and is never
/// held across an await.
#[derive(Debug)]
pub(crate) struct Pager<P> {
    growth: Growth,
    state: Mutex<State<P>>,
}

impl<P: Window> Pager<P> {
    pub(crate) fn new(growth: Growth) -> Self {
        Self {
            growth,
            state: Mutex::new(State {
                pages: VecDeque::new(),
                fetching: false,
                epoch: 0,
                stale: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State<P>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The page whose outgoing cursor continues the walk.
    fn frontier(state: &State<P>, growth: Growth) -> Option<&P> {
        match growth {
            Growth::Append => state.pages.back(),
            Growth::Prepend => state.pages.front(),
        }
    }

    /// Claim the fetch slot if the walk can continue.
    pub(crate) fn start(&self) -> Start<'_, P> {
        let mut state = self.lock();
        if state.fetching {
            return Start::Busy;
        }

        let cursor = match Self::frontier(&state, self.growth) {
            None => None,
            Some(page) => match page.outgoing() {
                Some(cursor) => Some(cursor),
                None => return Start::Exhausted,
            },
        };

        state.fetching = true;
        Start::Fetch(
            InFlight {
                pager: self,
                epoch: state.epoch,
            },
            cursor,
        )
    }

    /// Drop every page and detach any outstanding fetch.
    pub(crate) fn reset(&self) {
        let mut state = self.lock();
        state.pages.clear();
        state.epoch += 1;
        state.fetching = false;
        state.stale = true;
    }

    /// Replace all pages with one page obtained elsewhere.
    pub(crate) fn seed(&self, page: P) {
        let mut state = self.lock();
        state.pages.clear();
        state.pages.push_back(page);
        state.epoch += 1;
        state.fetching = false;
        state.stale = false;
    }

    pub(crate) fn is_fetching(&self) -> bool {
        self.lock().fetching
    }

    pub(crate) fn is_stale(&self) -> bool {
        self.lock().stale
    }

    /// True until a page without an outgoing cursor has been stored.
    pub(crate) fn has_more(&self) -> bool {
        let state = self.lock();
        Self::frontier(&state, self.growth).is_none_or(|page| page.outgoing().is_some())
    }

    pub(crate) fn page_count(&self) -> usize {
        self.lock().pages.len()
    }

    /// All items in page order.
    pub(crate) fn flatten(&self) -> Vec<P::Item> {
        self.lock()
            .pages
            .iter()
            .flat_map(|page| page.items().iter().cloned())
            .collect()
    }
}

/// The claimed fetch slot of a [`Pager`].
///
/// Releases the slot when dropped, so abandoning a fetch future never leaves
/// the pager stuck in the fetching state.
pub(crate) struct InFlight<'a, P: Window> {
    pager: &'a Pager<P>,
    epoch: u64,
}

impl<P: Window> InFlight<'_, P> {
    /// Store the fetched page. Returns false if the pager was reset while
    /// the fetch was outstanding, in which case the page is dropped.
    pub(crate) fn commit(self, page: P) -> bool {
        let mut state = self.pager.lock();
        if state.epoch != self.epoch {
            return false;
        }
        match self.pager.growth {
            Growth::Append => state.pages.push_back(page),
            Growth::Prepend => state.pages.push_front(page),
        }
        state.stale = false;
        true
    }
}

impl<P: Window> Drop for InFlight<'_, P> {
    fn drop(&mut self) {
        let mut state = self.pager.lock();
        if state.epoch == self.epoch {
            state.fetching = false;
        }
    }
}
