//! Writing comments and reconciling the comment window.

use tracing::{debug, instrument, warn};

use super::CommentWindow;
use crate::Result;
use crate::error::{Error, InvalidArgumentError};
use crate::model::Comment;
use crate::traits::FeedApi;

/// Comment text the user is composing.
///
/// A draft is only cleared by a successful write; after a failure it still
/// holds the text so the user can resubmit it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    content: String,
}

impl Draft {
    /// Create an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the draft text.
    pub fn set(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Returns the draft text.
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Returns true if the draft has no non-whitespace character.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    fn clear(&mut self) {
        self.content.clear();
    }
}

impl From<&str> for Draft {
    fn from(content: &str) -> Self {
        Self {
            content: content.to_string(),
        }
    }
}

/// Commits new comments and keeps a [`CommentWindow`] consistent with them.
///
/// After a successful write the window's pages are discarded and the most
/// recent page is fetched again. Restarting from the newest cursor is what
/// makes this correct: cursors held from before the write would either
/// skip or repeat the new comment. If another write lands between the
/// reset and the refetch, the refetch simply shows it too.
#[derive(Debug)]
pub struct WriteReconciler<'w, A> {
    window: &'w CommentWindow<A>,
}

impl<'w, A: FeedApi> WriteReconciler<'w, A> {
    /// Reconcile writes against `window`.
    pub fn new(window: &'w CommentWindow<A>) -> Self {
        Self { window }
    }

    /// Add the draft as a comment on the window's post.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` if the draft is blank; nothing is sent.
    /// - `WriteFailed` if the comment was not stored; the draft is kept.
    ///
    /// A failed refetch after a successful write is not an error: the
    /// window stays invalidated and [`CommentWindow::needs_refresh`]
    /// reports it.
    #[instrument(skip(self, draft), fields(post_id = %self.window.post_id()))]
    pub async fn add_comment(&self, draft: &mut Draft) -> Result<Comment> {
        if draft.is_blank() {
            return Err(InvalidArgumentError::EmptyContent.into());
        }

        let comment = match self
            .window
            .api()
            .add_comment(self.window.post_id(), draft.as_str())
            .await
        {
            Ok(comment) => comment,
            Err(e @ (Error::InvalidArgument(_) | Error::WriteFailed { .. })) => return Err(e),
            Err(e) => {
                warn!(error = %e, "Comment write did not complete");
                return Err(Error::write_failed(e.to_string()));
            }
        };

        debug!(comment_id = %comment.id, "Comment written, refreshing window");
        draft.clear();

        if let Err(e) = self.window.refresh().await {
            warn!(error = %e, "Refetch after write failed, window left invalidated");
        }

        Ok(comment)
    }
}

impl<A: FeedApi> CommentWindow<A> {
    /// Shorthand for [`WriteReconciler::add_comment`] on this window.
    pub async fn add_comment(&self, draft: &mut Draft) -> Result<Comment> {
        WriteReconciler::new(self).add_comment(draft).await
    }
}
