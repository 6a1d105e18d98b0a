//! Serve command implementation.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tokio::net::TcpListener;
use tracing::info;

use crate::backend::Backend;
use crate::output;

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "SCROLLFEED_BIND", default_value = "127.0.0.1:3000")]
    pub bind: String,
}

pub async fn run(args: ServeArgs, store: Option<&str>) -> Result<()> {
    let api = Arc::new(Backend::open(store)?);

    let listener = TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;
    let addr = listener.local_addr()?;

    output::success(&format!("Listening on http://{}", addr));

    scrollfeed_xrpc::serve(listener, api, shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}
