//! Serve command: run the MCP server over stdio.

use anyhow::Context;
use clap::Args;
use prose_probe_core::config::Config;
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing::{debug, info, instrument};

use crate::server::ProjectServer;

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug, Default)]
pub struct ServeArgs {}

/// Serve MCP requests on stdin/stdout until the client disconnects.
#[instrument(name = "cmd_serve", skip_all)]
pub async fn cmd_serve(
    _args: ServeArgs,
    max_input_bytes: Option<usize>,
    config: Config,
) -> anyhow::Result<()> {
    debug!(max_input_bytes = ?max_input_bytes, "starting MCP server");

    let server = ProjectServer::new()
        .with_input_limit(max_input_bytes)
        .with_strip_markdown(config.strip_markdown);
    let service = server
        .serve(stdio())
        .await
        .context("failed to start MCP server on stdio")?;

    info!("MCP server ready");
    service.waiting().await.context("MCP server terminated")?;
    info!("MCP server stopped");
    Ok(())
}
