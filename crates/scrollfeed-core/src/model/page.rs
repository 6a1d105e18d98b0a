//! Bounded fetch results.

use serde::{Deserialize, Serialize};

use super::{Comment, Post};
use crate::types::Cursor;

/// One page of the post feed, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPage {
    pub items: Vec<Post>,
    /// Cursor for the next (older) page, absent when the feed is exhausted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<Cursor>,
}

impl PostPage {
    /// Returns true if another page follows this one.
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }
}

/// One page of a post's comments, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPage {
    pub items: Vec<Comment>,
    /// Cursor for the page of older comments, absent when none remain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_cursor: Option<Cursor>,
}

impl CommentPage {
    /// Returns true if older comments remain.
    pub fn has_more(&self) -> bool {
        self.previous_cursor.is_some()
    }
}
