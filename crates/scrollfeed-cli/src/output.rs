//! Output formatting helpers.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use scrollfeed_core::{Comment, Post};

/// Print a success message.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print a labeled field to stderr, keeping stdout for data.
pub fn field(label: &str, value: &str) {
    eprintln!("{}: {}", label.dimmed(), value);
}

/// Print a value as compact JSON.
pub fn json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a value as pretty-printed JSON.
pub fn json_pretty<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

/// Print a record as JSON, one line per record unless `pretty` is set.
pub fn record<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    if pretty { json_pretty(value) } else { json(value) }
}

/// Print a post as a short human-readable line.
pub fn post_line(post: &Post) {
    println!(
        "{} {} {} {}",
        format!("#{}", post.id).bold(),
        post.title,
        format!("by {}", post.author.name).dimmed(),
        format!("({} comments)", post.comment_count).dimmed()
    );
}

/// Print a comment as a short human-readable line.
pub fn comment_line(comment: &Comment) {
    println!(
        "{} {} {}",
        format!("#{}", comment.id).bold(),
        comment.content,
        comment.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
    );
}
