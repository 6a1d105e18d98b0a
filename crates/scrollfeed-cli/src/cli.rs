//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{browse, comment, comments, posts, seed, serve, thread};

/// Browse, comment on and serve a cursor-paginated feed.
#[derive(Parser, Debug)]
#[command(name = "scrollfeed")]
#[command(author, version = env!("SCROLLFEED_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Feed store: a file:// directory or an http(s):// feed server
    /// (defaults to a store in the user data directory)
    #[arg(long, global = true, env = "SCROLLFEED_STORE")]
    pub store: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one page of posts
    Posts(posts::PostsArgs),

    /// Fetch one page of a post's comments
    Comments(comments::CommentsArgs),

    /// Scroll through the whole feed page by page
    Browse(browse::BrowseArgs),

    /// Show a post's comments, oldest first
    Thread(thread::ThreadArgs),

    /// Add a comment to a post
    Comment(comment::CommentArgs),

    /// Import fixture posts into a file store
    Seed(seed::SeedArgs),

    /// Serve the store over HTTP
    Serve(serve::ServeArgs),
}
