//! Page fetching with over-fetch-and-trim.
//!
//! Every fetch asks the store for `limit + 1` rows. If the extra row comes
//! back, the page is trimmed to `limit` and the outgoing cursor is set to
//! the last row kept; the next request asks for rows strictly below it.
//! This answers "is there more?" with one extra row instead of a count
//! query.

use tracing::{debug, instrument};

use crate::Result;
use crate::model::{CommentPage, PostPage};
use crate::traits::FeedStore;
use crate::types::{Cursor, Limit, PostId, Positioned};

/// Returns true if a fetch of `fetched` rows means the walk is over.
pub fn is_exhausted(fetched: usize, limit: Limit) -> bool {
    fetched <= limit.get()
}

/// Trim an over-fetched batch to `limit` and compute the outgoing cursor.
pub fn trim<T: Positioned>(mut rows: Vec<T>, limit: Limit) -> (Vec<T>, Option<Cursor>) {
    if is_exhausted(rows.len(), limit) {
        return (rows, None);
    }
    rows.truncate(limit.get());
    let cursor = rows.last().map(Cursor::after);
    (rows, cursor)
}

/// Fetch one page of posts, newest first.
///
/// With no cursor the page starts at the newest post.
#[instrument(skip(store))]
pub async fn fetch_posts<S>(store: &S, cursor: Option<Cursor>, limit: Limit) -> Result<PostPage>
where
    S: FeedStore + ?Sized,
{
    let rows = store
        .list_posts(cursor.map(Cursor::bound), limit.over_fetch())
        .await?;
    let fetched = rows.len();
    let (items, next_cursor) = trim(rows, limit);

    debug!(fetched, returned = items.len(), ?next_cursor, "Fetched posts");

    Ok(PostPage { items, next_cursor })
}

/// Fetch one page of a post's comments, walking backward in time.
///
/// Rows are read newest first and the kept batch is reversed, so each page
/// is in chronological order. With no cursor the page holds the most
/// recent comments. An unknown post yields an empty page.
#[instrument(skip(store))]
pub async fn fetch_comments<S>(
    store: &S,
    post_id: PostId,
    cursor: Option<Cursor>,
    limit: Limit,
) -> Result<CommentPage>
where
    S: FeedStore + ?Sized,
{
    let rows = store
        .list_comments(post_id, cursor.map(Cursor::bound), limit.over_fetch())
        .await?;
    let fetched = rows.len();
    let (mut items, previous_cursor) = trim(rows, limit);

    // Pages are small; reordering here is cheaper than a second sort key in
    // the store query.
    items.reverse();

    debug!(fetched, returned = items.len(), ?previous_cursor, "Fetched comments");

    Ok(CommentPage {
        items,
        previous_cursor,
    })
}
