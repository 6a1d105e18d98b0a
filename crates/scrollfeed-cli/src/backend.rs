//! Opening the configured feed store.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use directories::ProjectDirs;
use tracing::debug;

use scrollfeed_core::traits::{CommentsQuery, FeedApi, PostsQuery};
use scrollfeed_core::{Comment, CommentPage, FeedService, FeedUrl, PostId, PostPage};
use scrollfeed_file::FileStore;
use scrollfeed_xrpc::XrpcFeed;

/// A feed API over either a local store or a remote server.
#[derive(Debug)]
pub enum Backend {
    File(FeedService<FileStore>),
    Xrpc(XrpcFeed),
}

impl Backend {
    /// Open the store named by `--store`, or the default local store.
    pub fn open(store: Option<&str>) -> Result<Self> {
        let url = resolve_url(store)?;
        debug!(store = %url, "Opening feed store");

        if let Some(root) = url.to_file_path() {
            Ok(Backend::File(FeedService::new(FileStore::new(root))))
        } else {
            let feed = XrpcFeed::new(url).context("Failed to create feed client")?;
            Ok(Backend::Xrpc(feed))
        }
    }

    /// Open the store and require it to be local.
    pub fn open_local(store: Option<&str>) -> Result<FileStore> {
        match Self::open(store)? {
            Backend::File(service) => Ok(service.store().clone()),
            Backend::Xrpc(feed) => bail!(
                "{} is a remote feed; this command needs a file:// store",
                feed.url()
            ),
        }
    }
}

/// Resolve the store URL, falling back to the user data directory.
fn resolve_url(store: Option<&str>) -> Result<FeedUrl> {
    match store {
        Some(s) => FeedUrl::new(s).context("Invalid store URL"),
        None => {
            let dir = default_store_dir()?;
            FeedUrl::from_directory(&dir).context("Invalid default store directory")
        }
    }
}

fn default_store_dir() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("", "", "scrollfeed").context("Could not determine data directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.to_path_buf())
}

#[async_trait]
impl FeedApi for Backend {
    async fn get_posts(&self, query: PostsQuery) -> scrollfeed_core::Result<PostPage> {
        match self {
            Backend::File(service) => service.get_posts(query).await,
            Backend::Xrpc(feed) => feed.get_posts(query).await,
        }
    }

    async fn get_comments(&self, query: CommentsQuery) -> scrollfeed_core::Result<CommentPage> {
        match self {
            Backend::File(service) => service.get_comments(query).await,
            Backend::Xrpc(feed) => feed.get_comments(query).await,
        }
    }

    async fn add_comment(&self, post_id: PostId, content: &str) -> scrollfeed_core::Result<Comment> {
        match self {
            Backend::File(service) => service.add_comment(post_id, content).await,
            Backend::Xrpc(feed) => feed.add_comment(post_id, content).await,
        }
    }
}
