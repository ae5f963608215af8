//! File tools
//!
//! - `create_file`, `modify_file`, `rewrite_file`: mutations through the XML
//!   diff protocol or plain parameters
//! - `delete_file`: soft delete into the trash directory
//! - `read_file`, `read_multiple_files`: reads inside the allowed roots
//! - `file_tree`: tree view honoring git tracking or `.gitignore`

pub mod create;
pub mod delete;
pub mod modify;
pub mod read;
pub mod read_multiple;
pub mod rewrite;
pub mod tree;

use crate::mcp::tool_registry::ToolRegistry;

/// Register all file tools with the registry
pub fn register_file_tools(registry: &mut ToolRegistry) {
    registry.register(create::CreateFileTool::new());
    registry.register(modify::ModifyFileTool::new());
    registry.register(rewrite::RewriteFileTool::new());
    registry.register(delete::DeleteFileTool::new());
    registry.register(read::ReadFileTool::new());
    registry.register(read_multiple::ReadMultipleFilesTool::new());
    registry.register(tree::FileTreeTool::new());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_file_tools() {
        let mut registry = ToolRegistry::new();
        register_file_tools(&mut registry);

        assert_eq!(registry.len(), 7);
        for tool in registry.list_tools() {
            assert!(tool.description.is_some());
            assert!(!tool.input_schema.is_empty());
        }
    }
}
