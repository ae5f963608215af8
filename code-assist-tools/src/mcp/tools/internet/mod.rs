//! Internet tools

pub mod ask;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all internet tools with the registry
pub fn register_internet_tools(registry: &mut ToolRegistry) {
    registry.register(ask::AskInternetTool::new());
}
