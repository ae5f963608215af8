//! Model Context Protocol (MCP) server support
//!
//! - **Server**: [`McpServer`] answers MCP requests and dispatches tool calls
//! - **Tool registry**: [`ToolRegistry`] holds every [`McpTool`] by name
//! - **Tool context**: [`ToolContext`] carries the file editor, configuration
//!   and HTTP client into each call
//! - **Prompts**: the built-in prompts in [`prompts`]
//!
//! ```rust
//! use code_assist_tools::mcp::{register_file_tools, register_git_tools, ToolRegistry};
//!
//! let mut registry = ToolRegistry::new();
//! register_file_tools(&mut registry);
//! register_git_tools(&mut registry);
//! assert!(registry.get_tool("modify_file").is_some());
//! ```

pub mod error_handling;
pub mod prompts;
pub mod server;
pub mod tool_registry;
pub mod tools;
pub mod unified_server;

pub use error_handling::McpErrorHandler;
pub use server::McpServer;
pub use tool_registry::{
    register_all_tools, register_directory_tools, register_file_tools, register_git_tools,
    register_internet_tools, BaseToolImpl, McpTool, ToolContext, ToolRegistry,
};
pub use unified_server::run_stdio_server;
