//! Subcommand implementations.

pub mod browse;
pub mod comment;
pub mod comments;
pub mod posts;
pub mod seed;
pub mod serve;
pub mod thread;

use anyhow::{Context, Result};
use colored::Colorize;

use scrollfeed_core::{Cursor, Error, Limit, PostId};

use crate::cli::Commands;

pub async fn handle(cmd: Commands, store: Option<&str>) -> Result<()> {
    match cmd {
        Commands::Posts(args) => posts::run(args, store).await,
        Commands::Comments(args) => comments::run(args, store).await,
        Commands::Browse(args) => browse::run(args, store).await,
        Commands::Thread(args) => thread::run(args, store).await,
        Commands::Comment(args) => comment::run(args, store).await,
        Commands::Seed(args) => seed::run(args, store).await,
        Commands::Serve(args) => serve::run(args, store).await,
    }
}

/// Validate a `--limit` argument, applying the default when absent.
pub(crate) fn parse_limit(limit: Option<i64>) -> Result<Limit> {
    Limit::resolve(limit).context("Invalid limit")
}

pub(crate) fn parse_cursor(cursor: Option<&str>) -> Result<Option<Cursor>> {
    cursor
        .map(|c| c.parse::<Cursor>().context("Invalid cursor"))
        .transpose()
}

pub(crate) fn parse_post_id(post_id: &str) -> Result<PostId> {
    post_id.parse::<PostId>().context("Invalid post id")
}

/// Tell the user a failed request is worth retrying.
pub(crate) fn retry_hint(err: &Error) {
    if err.is_transient() {
        eprintln!("{}", "The feed store did not respond; try again shortly.".dimmed());
    }
}
