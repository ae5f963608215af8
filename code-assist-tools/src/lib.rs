//! # Code Assist Tools
//!
//! MCP server exposing file editing, directory, git and internet tools to
//! AI agents over stdio.
//!
//! ```no_run
//! use code_assist_config::ConfigProvider;
//! use code_assist_tools::mcp::{run_stdio_server, McpServer};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConfigProvider::new().load()?;
//! let server = McpServer::new(config)?;
//! run_stdio_server(server).await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod mcp;

pub use error::{ServerError, ServerResult};
pub use mcp::{McpServer, McpTool, ToolContext, ToolRegistry};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
pub(crate) mod test_utils;
