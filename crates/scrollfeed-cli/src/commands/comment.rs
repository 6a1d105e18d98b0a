//! Comment command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use scrollfeed_core::{CommentWindow, Draft, Limit};

use super::parse_post_id;
use crate::backend::Backend;
use crate::output;

#[derive(Args, Debug)]
pub struct CommentArgs {
    /// Post to comment on
    pub post_id: String,

    /// Comment text
    pub content: String,
}

pub async fn run(args: CommentArgs, store: Option<&str>) -> Result<()> {
    let window = CommentWindow::new(
        Backend::open(store)?,
        parse_post_id(&args.post_id)?,
        Limit::DEFAULT,
    );
    let mut draft = Draft::from(args.content.as_str());

    let comment = window
        .add_comment(&mut draft)
        .await
        .context("Failed to add comment")?;

    output::json(&comment)?;
    output::success(&format!("Added comment {}", comment.id));

    if window.needs_refresh() {
        eprintln!("{}", "Comment saved, but the thread could not be reloaded.".dimmed());
    } else {
        for comment in &window.comments() {
            output::comment_line(comment);
        }
    }

    Ok(())
}
