//! Directory creation tool

use crate::mcp::error_handling::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use code_assist_edit::EditError;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
struct CreateDirectoryRequest {
    path: String,
}

/// Tool for creating directories
#[derive(Default)]
pub struct CreateDirectoryTool;

impl CreateDirectoryTool {
    /// Creates a new instance of the CreateDirectoryTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreateDirectoryTool {
    fn name(&self) -> &'static str {
        "create_directory"
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
                    "description": "Directory to create"
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
        let request: CreateDirectoryRequest = BaseToolImpl::parse_arguments(arguments)?;

        let result = context.resolver().resolve(&request.path).and_then(|target| {
            std::fs::create_dir_all(&target)
                .map_err(|e| EditError::io("create directory", &target, e))?;
            info!(path = %target.display(), "Created directory");
            Ok(format!("Created directory: {}", target.display()))
        });

        Ok(McpErrorHandler::into_result(result, self.name()))
    }
}
