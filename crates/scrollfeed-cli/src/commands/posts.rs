//! Posts command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use scrollfeed_core::traits::{FeedApi, PostsQuery};

use super::{parse_cursor, parse_limit, retry_hint};
use crate::backend::Backend;
use crate::output;

#[derive(Args, Debug)]
pub struct PostsArgs {
    /// Page size (1-100, default 10)
    #[arg(long, allow_negative_numbers = true)]
    pub limit: Option<i64>,

    /// Continue after the `nextCursor` of a previous page
    #[arg(long)]
    pub cursor: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: PostsArgs, store: Option<&str>) -> Result<()> {
    let api = Backend::open(store)?;
    let query =
        PostsQuery::first(parse_limit(args.limit)?).after(parse_cursor(args.cursor.as_deref())?);

    let page = api
        .get_posts(query)
        .await
        .inspect_err(retry_hint)
        .context("Failed to fetch posts")?;

    if page.items.is_empty() {
        eprintln!("{}", "No posts found.".dimmed());
    }

    for post in &page.items {
        output::record(post, args.pretty)?;
    }

    if let Some(cursor) = &page.next_cursor {
        eprintln!();
        output::field("Next cursor", &cursor.to_string());
    }

    Ok(())
}
