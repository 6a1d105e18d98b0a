//! Seed command implementation.

use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Args;

use scrollfeed_core::NewPost;

use crate::backend::Backend;
use crate::output;

#[derive(Args, Debug)]
pub struct SeedArgs {
    /// JSON array of posts to import (use - for stdin)
    pub file: String,
}

pub async fn run(args: SeedArgs, store: Option<&str>) -> Result<()> {
    let store = Backend::open_local(store)?;

    let json = if args.file == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(&args.file).with_context(|| format!("Failed to read {}", args.file))?
    };

    let posts: Vec<NewPost> = serde_json::from_str(&json).context("Invalid posts JSON")?;

    let ids = tokio::task::spawn_blocking(move || store.import_posts(posts))
        .await
        .context("Import task failed")?
        .context("Failed to import posts")?;

    match (ids.first(), ids.last()) {
        (Some(first), Some(last)) => {
            output::success(&format!("Imported {} posts", ids.len()));
            output::field("Ids", &format!("{}..={}", first, last));
        }
        _ => output::success("Nothing to import"),
    }

    Ok(())
}
