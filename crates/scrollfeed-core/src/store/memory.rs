//! In-memory store.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, instrument};

use crate::Result;
use crate::error::StoreError;
use crate::model::{Author, Comment, NewPost, Post};
use crate::traits::FeedStore;
use crate::types::{CommentId, PostId};

/// A [`FeedStore`] held entirely in memory.
///
/// Posts and comments live in ordered maps keyed by identifier, so a
/// newest-first listing is a reverse range scan.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Tables>,
}

#[derive(Debug, Default)]
struct Tables {
    posts: BTreeMap<i64, Post>,
    comments: BTreeMap<i64, Comment>,
    last_post_id: i64,
    last_comment_id: i64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `count` generated posts with ids `1..=count`.
    pub fn with_posts(count: usize) -> Self {
        let store = Self::new();
        store.seed_posts((1..=count).map(|n| NewPost {
            title: format!("Post {n}"),
            content: format!("Body of post {n}"),
            author: Author {
                id: 1,
                name: "Seed".to_string(),
                email: None,
            },
        }));
        store
    }

    /// Insert fixture posts, assigning fresh identifiers in order.
    pub fn seed_posts(&self, posts: impl IntoIterator<Item = NewPost>) -> Vec<PostId> {
        let mut tables = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        posts
            .into_iter()
            .map(|new| {
                tables.last_post_id += 1;
                let id = PostId::new(tables.last_post_id);
                tables.posts.insert(
                    id.get(),
                    Post {
                        id,
                        title: new.title,
                        content: new.content,
                        created_at: Utc::now(),
                        author: new.author,
                        comment_count: 0,
                    },
                );
                id
            })
            .collect()
    }
}

impl Tables {
    fn comment_count(&self, post_id: PostId) -> u64 {
        self.comments
            .values()
            .filter(|c| c.post_id == post_id)
            .count() as u64
    }
}

#[async_trait]
impl FeedStore for MemoryStore {
    async fn list_posts(&self, before: Option<i64>, take: usize) -> Result<Vec<Post>> {
        let tables = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let upper = before.unwrap_or(i64::MAX);
        Ok(tables
            .posts
            .range(..upper)
            .rev()
            .take(take)
            .map(|(_, post)| Post {
                comment_count: tables.comment_count(post.id),
                ..post.clone()
            })
            .collect())
    }

    async fn list_comments(
        &self,
        post_id: PostId,
        before: Option<i64>,
        take: usize,
    ) -> Result<Vec<Comment>> {
        let tables = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let upper = before.unwrap_or(i64::MAX);
        Ok(tables
            .comments
            .range(..upper)
            .rev()
            .filter(|(_, c)| c.post_id == post_id)
            .take(take)
            .map(|(_, c)| c.clone())
            .collect())
    }

    #[instrument(skip(self, content))]
    async fn create_comment(&self, post_id: PostId, content: &str) -> Result<Comment> {
        let mut tables = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if !tables.posts.contains_key(&post_id.get()) {
            return Err(StoreError::Rejected {
                message: format!("post {} does not exist", post_id),
            }
            .into());
        }

        tables.last_comment_id += 1;
        let comment = Comment {
            id: CommentId::new(tables.last_comment_id),
            post_id,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        tables.comments.insert(comment.id.get(), comment.clone());

        debug!(comment_id = %comment.id, "Created comment");

        Ok(comment)
    }
}
