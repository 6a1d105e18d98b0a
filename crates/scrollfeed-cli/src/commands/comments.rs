//! Comments command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use scrollfeed_core::traits::{CommentsQuery, FeedApi};

use super::{parse_cursor, parse_limit, parse_post_id, retry_hint};
use crate::backend::Backend;
use crate::output;

#[derive(Args, Debug)]
pub struct CommentsArgs {
    /// Post whose comments to list
    pub post_id: String,

    /// Page size (1-100, default 10)
    #[arg(long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Continue before the `previousCursor` of a previous page
    #[arg(long)]
    pub cursor: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: CommentsArgs, store: Option<&str>) -> Result<()> {
    let api = Backend::open(store)?;
    let post_id = parse_post_id(&args.post_id)?;
    let query = CommentsQuery::latest(post_id, parse_limit(args.limit)?)
        .before(parse_cursor(args.cursor.as_deref())?);

    let page = api
        .get_comments(query)
        .await
        .inspect_err(retry_hint)
        .context("Failed to fetch comments")?;

    if page.items.is_empty() {
        eprintln!("{}", "No comments found.".dimmed());
    }

    for comment in &page.items {
        output::record(comment, args.pretty)?;
    }

    if let Some(cursor) = &page.previous_cursor {
        eprintln!();
        output::field("Previous cursor", &cursor.to_string());
    }

    Ok(())
}
