//! scrollfeed-xrpc - The feed API over HTTP.
//!
//! [`XrpcFeed`] is a client implementing [`FeedApi`](scrollfeed_core::FeedApi)
//! against a remote server; [`router`] and [`serve`] expose any `FeedApi`
//! under the same `/xrpc/<method>` endpoints.

mod client;
pub mod endpoints;
mod feed;
mod server;

pub use feed::XrpcFeed;
pub use server::{router, serve};
