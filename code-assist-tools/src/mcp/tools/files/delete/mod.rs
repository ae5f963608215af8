//! Soft delete tool

use crate::mcp::error_handling::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct DeleteFileRequest {
    path: String,
}

/// Tool for moving files to the trash
#[derive(Default)]
pub struct DeleteFileTool;

impl DeleteFileTool {
    /// Creates a new instance of the DeleteFileTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for DeleteFileTool {
    fn name(&self) -> &'static str {
        "delete_file"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Path of the file to delete"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: DeleteFileRequest = BaseToolImpl::parse_arguments(arguments)?;

        let result = context
            .editor
            .delete_file(&request.path)
            .await
            .map(|location| location.to_string());

        Ok(McpErrorHandler::into_result(result, self.name()))
    }
}
