//! Thread command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use scrollfeed_core::CommentWindow;

use super::{parse_limit, parse_post_id, retry_hint};
use crate::backend::Backend;
use crate::output;

#[derive(Args, Debug)]
pub struct ThreadArgs {
    /// Post whose comments to show
    pub post_id: String,

    /// Page size (1-100, default 10)
    #[arg(long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Load every older page, not just the most recent one
    #[arg(long)]
    pub all: bool,

    /// Print comments as JSON lines
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ThreadArgs, store: Option<&str>) -> Result<()> {
    let window = CommentWindow::new(
        Backend::open(store)?,
        parse_post_id(&args.post_id)?,
        parse_limit(args.limit)?,
    );

    window
        .load_older()
        .await
        .inspect_err(retry_hint)
        .context("Failed to load comments")?;

    while args.all && window.has_older() {
        if !window
            .load_older()
            .await
            .inspect_err(retry_hint)
            .context("Failed to load older comments")?
            .is_loaded()
        {
            break;
        }
    }

    let comments = window.comments();
    if comments.is_empty() {
        eprintln!("{}", "No comments found.".dimmed());
        return Ok(());
    }

    for comment in &comments {
        if args.json {
            output::json(comment)?;
        } else {
            output::comment_line(comment);
        }
    }

    if window.has_older() {
        eprintln!("{}", "Older comments available (use --all).".dimmed());
    }

    Ok(())
}
