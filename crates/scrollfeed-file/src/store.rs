//! Filesystem storage for the feed.
//!
//! Layout under the store root:
//!
//! ```text
//! feed/
//!   sequence.json               last assigned post and comment ids
//!   store.lock                  writer lock
//!   posts/<id>.json
//!   comments/<post-id>/<id>.json
//! ```
//!
//! Every file is written to a temporary sibling and renamed into place, so
//! a concurrent reader sees either the old state or the new one, never a
//! partial row. Writers serialize on an exclusive lock, which also makes
//! the store safe to share between processes.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use scrollfeed_core::error::{Error, StoreError};
use scrollfeed_core::model::{Author, Comment, NewPost, Post};
use scrollfeed_core::traits::FeedStore;
use scrollfeed_core::types::{CommentId, PostId};
use scrollfeed_core::Result;

fn map_io(err: std::io::Error) -> Error {
    StoreError::Io {
        message: format!("IO error: {}", err),
    }
    .into()
}

fn corrupt(path: &Path, err: impl std::fmt::Display) -> Error {
    StoreError::Corrupt {
        location: path.display().to_string(),
        message: err.to_string(),
    }
    .into()
}

/// A post as stored on disk. The comment count is derived on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredPost {
    id: PostId,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    author: Author,
}

/// Last identifiers handed out. Identifiers are never reused.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Sequence {
    last_post_id: i64,
    last_comment_id: i64,
}

/// Filesystem-backed [`FeedStore`].
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Open (or lazily create) a store at the given root directory.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn feed_dir(&self) -> PathBuf {
        self.root.join("feed")
    }

    fn posts_dir(&self) -> PathBuf {
        self.feed_dir().join("posts")
    }

    fn comments_dir(&self, post_id: PostId) -> PathBuf {
        self.feed_dir().join("comments").join(post_id.to_string())
    }

    fn post_path(&self, id: PostId) -> PathBuf {
        self.posts_dir().join(format!("{}.json", id))
    }

    fn comment_path(&self, post_id: PostId, id: CommentId) -> PathBuf {
        self.comments_dir(post_id).join(format!("{}.json", id))
    }

    fn sequence_path(&self) -> PathBuf {
        self.feed_dir().join("sequence.json")
    }

    fn lock_path(&self) -> PathBuf {
        self.feed_dir().join("store.lock")
    }

    /// Take the writer lock. Released when the returned file is dropped.
    fn lock_exclusive(&self) -> Result<File> {
        fs::create_dir_all(self.feed_dir()).map_err(map_io)?;
        let lock_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(map_io)?;
        lock_file.lock_exclusive().map_err(map_io)?;
        Ok(lock_file)
    }

    fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(map_io(e)),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| corrupt(path, e))
    }

    fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(map_io)?;
        }
        let content = serde_json::to_string_pretty(value).map_err(|e| corrupt(path, e))?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &content).map_err(map_io)?;
        fs::rename(&temp_path, path).map_err(map_io)?;
        Ok(())
    }

    fn read_sequence(&self) -> Result<Sequence> {
        Ok(Self::read_json(&self.sequence_path())?.unwrap_or_default())
    }

    /// Identifiers of the `*.json` records in `dir`, highest first.
    fn ids_descending(dir: &Path) -> Result<Vec<i64>> {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(map_io(e)),
        };

        let mut ids: Vec<i64> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|p| p.file_stem()?.to_str()?.parse().ok())
            .collect();

        ids.sort_unstable_by(|a, b| b.cmp(a));
        Ok(ids)
    }

    /// Page through `dir` newest first, strictly below `before`.
    fn window(dir: &Path, before: Option<i64>, take: usize) -> Result<Vec<i64>> {
        let upper = before.unwrap_or(i64::MAX);
        Ok(Self::ids_descending(dir)?
            .into_iter()
            .filter(|id| *id < upper)
            .take(take)
            .collect())
    }

    fn load_post(&self, id: PostId) -> Result<Option<Post>> {
        let Some(stored) = Self::read_json::<StoredPost>(&self.post_path(id))? else {
            return Ok(None);
        };
        let comment_count = Self::ids_descending(&self.comments_dir(id))?.len() as u64;

        Ok(Some(Post {
            id: stored.id,
            title: stored.title,
            content: stored.content,
            created_at: stored.created_at,
            author: stored.author,
            comment_count,
        }))
    }

    /// Seed the store with fixture posts, assigning fresh identifiers in
    /// input order.
    #[instrument(skip(self, posts))]
    pub fn import_posts(&self, posts: Vec<NewPost>) -> Result<Vec<PostId>> {
        let lock = self.lock_exclusive()?;
        let mut sequence = self.read_sequence()?;
        let mut ids = Vec::with_capacity(posts.len());

        for new in posts {
            sequence.last_post_id += 1;
            let id = PostId::new(sequence.last_post_id);
            let stored = StoredPost {
                id,
                title: new.title,
                content: new.content,
                created_at: Utc::now(),
                author: new.author,
            };
            // Advance the sequence before the row becomes visible.
            Self::write_json(&self.sequence_path(), &sequence)?;
            Self::write_json(&self.post_path(id), &stored)?;
            ids.push(id);
        }

        lock.unlock().map_err(map_io)?;

        debug!(count = ids.len(), "Imported posts");

        Ok(ids)
    }
}

#[async_trait]
impl FeedStore for FileStore {
    #[instrument(skip(self))]
    async fn list_posts(&self, before: Option<i64>, take: usize) -> Result<Vec<Post>> {
        let mut posts = Vec::with_capacity(take);
        for id in Self::window(&self.posts_dir(), before, take)? {
            if let Some(post) = self.load_post(PostId::new(id))? {
                posts.push(post);
            }
        }
        Ok(posts)
    }

    #[instrument(skip(self))]
    async fn list_comments(
        &self,
        post_id: PostId,
        before: Option<i64>,
        take: usize,
    ) -> Result<Vec<Comment>> {
        let mut comments = Vec::with_capacity(take);
        for id in Self::window(&self.comments_dir(post_id), before, take)? {
            let path = self.comment_path(post_id, CommentId::new(id));
            if let Some(comment) = Self::read_json::<Comment>(&path)? {
                comments.push(comment);
            }
        }
        Ok(comments)
    }

    #[instrument(skip(self, content))]
    async fn create_comment(&self, post_id: PostId, content: &str) -> Result<Comment> {
        let lock = self.lock_exclusive()?;

        if !self.post_path(post_id).exists() {
            return Err(StoreError::Rejected {
                message: format!("post {} does not exist", post_id),
            }
            .into());
        }

        let mut sequence = self.read_sequence()?;
        sequence.last_comment_id += 1;
        let comment = Comment {
            id: CommentId::new(sequence.last_comment_id),
            post_id,
            content: content.to_string(),
            created_at: Utc::now(),
        };

        Self::write_json(&self.sequence_path(), &sequence)?;
        Self::write_json(&self.comment_path(post_id, comment.id), &comment)?;

        lock.unlock().map_err(map_io)?;

        debug!(comment_id = %comment.id, "Created comment");

        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrollfeed_core::pagination::{fetch_comments, fetch_posts};
    use scrollfeed_core::types::Limit;
    use tempfile::TempDir;

    fn fixtures(count: usize) -> Vec<NewPost> {
        (1..=count)
            .map(|n| NewPost {
                title: format!("Post {n}"),
                content: format!("Body {n}"),
                author: Author {
                    id: 7,
                    name: "Ada".to_string(),
                    email: Some("ada@example.com".to_string()),
                },
            })
            .collect()
    }

    fn store_with_posts(count: usize) -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        store.import_posts(fixtures(count)).unwrap();
        (dir, store)
    }

    #[tokio::test]
    async fn empty_directory_is_empty_feed() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("does-not-exist-yet"));
        assert!(store.list_posts(None, 11).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn posts_are_listed_newest_first() {
        let (_dir, store) = store_with_posts(12);
        let ids: Vec<i64> = store
            .list_posts(Some(10), 3)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id.get())
            .collect();
        assert_eq!(ids, vec![9, 8, 7]);
    }

    #[tokio::test]
    async fn pagination_over_files_matches_boundaries() {
        let (_dir, store) = store_with_posts(11);
        let limit = Limit::new(10).unwrap();

        let first = fetch_posts(&store, None, limit).await.unwrap();
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.items[0].id.get(), 11);
        assert_eq!(first.next_cursor.unwrap().to_string(), "2");

        let second = fetch_posts(&store, first.next_cursor, limit).await.unwrap();
        assert_eq!(second.items.len(), 1);
        assert_eq!(second.items[0].id.get(), 1);
        assert!(second.next_cursor.is_none());
    }

    #[tokio::test]
    async fn comments_round_trip_and_count() {
        let (_dir, store) = store_with_posts(2);
        let first = store.create_comment(PostId::new(2), "first").await.unwrap();
        let second = store.create_comment(PostId::new(2), "second").await.unwrap();
        assert!(second.id > first.id);

        let page = fetch_comments(&store, PostId::new(2), None, Limit::DEFAULT)
            .await
            .unwrap();
        let contents: Vec<&str> = page.items.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);

        let posts = store.list_posts(None, 1).await.unwrap();
        assert_eq!(posts[0].comment_count, 2);
    }

    #[tokio::test]
    async fn comment_on_missing_post_is_rejected() {
        let (_dir, store) = store_with_posts(1);
        let err = store.create_comment(PostId::new(5), "hi").await.unwrap_err();
        assert!(matches!(
            err,
            Error::StoreUnavailable(StoreError::Rejected { .. })
        ));
    }

    #[tokio::test]
    async fn ids_survive_reopen() {
        let (dir, store) = store_with_posts(3);
        store.create_comment(PostId::new(1), "a").await.unwrap();
        drop(store);

        let reopened = FileStore::new(dir.path());
        let ids = reopened.import_posts(fixtures(1)).unwrap();
        assert_eq!(ids, vec![PostId::new(4)]);
        let comment = reopened.create_comment(PostId::new(4), "b").await.unwrap();
        assert_eq!(comment.id.get(), 2);
    }

    #[tokio::test]
    async fn stray_files_are_ignored() {
        let (dir, store) = store_with_posts(2);
        let posts = dir.path().join("feed").join("posts");
        fs::write(posts.join("notes.txt"), "hello").unwrap();
        fs::write(posts.join("3.tmp"), "{").unwrap();

        assert_eq!(store.list_posts(None, 10).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn corrupt_record_is_reported() {
        let (dir, store) = store_with_posts(1);
        fs::write(dir.path().join("feed").join("posts").join("1.json"), "{ nope").unwrap();

        let err = store.list_posts(None, 10).await.unwrap_err();
        assert!(matches!(
            err,
            Error::StoreUnavailable(StoreError::Corrupt { .. })
        ));
    }
}
