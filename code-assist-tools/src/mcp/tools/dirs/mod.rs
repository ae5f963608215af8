//! Directory tools
//!
//! - `list_directory`: immediate children of a directory
//! - `create_directory`: create a directory and its parents

pub mod create;
pub mod list;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all directory tools with the registry
pub fn register_directory_tools(registry: &mut ToolRegistry) {
    registry.register(list::ListDirectoryTool::new());
    registry.register(create::CreateDirectoryTool::new());
}
