//! Transport wiring for the MCP server

use super::server::McpServer;
use crate::error::{ServerError, ServerResult};
use rmcp::serve_server;
use rmcp::transport::io::stdio;

/// Serve `server` over stdin/stdout until the client disconnects
///
/// Nothing else may write to stdout while this runs; logging must go to
/// stderr or a file.
pub async fn run_stdio_server(server: McpServer) -> ServerResult<()> {
    tracing::info!("Starting MCP server in stdio mode");

    let running_service = serve_server(server, stdio())
        .await
        .map_err(|e| ServerError::Transport {
            message: format!("failed to start stdio server: {e}"),
        })?;

    tracing::info!("MCP stdio server started successfully");

    let quit_reason = running_service
        .waiting()
        .await
        .map_err(|e| ServerError::Transport {
            message: format!("stdio server task failed: {e}"),
        })?;

    tracing::info!("MCP stdio server completed: {:?}", quit_reason);
    Ok(())
}
