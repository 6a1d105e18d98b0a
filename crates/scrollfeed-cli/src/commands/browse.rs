//! Browse command implementation.
//!
//! Drives a [`PostFeed`] the way a scrolling view would: every page is
//! requested through the proximity trigger until the feed runs out.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tracing::debug;

use scrollfeed_core::PostFeed;

use super::{parse_limit, retry_hint};
use crate::backend::Backend;
use crate::output;

#[derive(Args, Debug)]
pub struct BrowseArgs {
    /// Page size (1-100, default 10)
    #[arg(long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Stop after this many pages
    #[arg(long)]
    pub max_pages: Option<usize>,

    /// Print posts as JSON lines
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: BrowseArgs, store: Option<&str>) -> Result<()> {
    let feed = PostFeed::new(Backend::open(store)?, parse_limit(args.limit)?);
    let mut shown = 0;

    loop {
        if args.max_pages.is_some_and(|max| feed.page_count() >= max) {
            break;
        }

        let outcome = feed
            .on_proximity(true)
            .await
            .inspect_err(retry_hint)
            .context("Failed to load more posts")?;
        debug!(?outcome, pages = feed.page_count(), "Scrolled");

        if !outcome.is_loaded() {
            break;
        }

        let posts = feed.flatten();
        for post in &posts[shown..] {
            if args.json {
                output::json(post)?;
            } else {
                output::post_line(post);
            }
        }
        shown = posts.len();
    }

    if shown == 0 {
        eprintln!("{}", "No posts found.".dimmed());
    } else if feed.has_more() {
        eprintln!("{}", "More posts available.".dimmed());
    } else {
        eprintln!("{}", "End of feed.".dimmed());
    }

    Ok(())
}
