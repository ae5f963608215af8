//! File creation tool

use crate::mcp::error_handling::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct CreateFileRequest {
    path: String,
    content: Option<String>,
    xml_content: Option<String>,
}

/// Tool for creating files
#[derive(Default)]
pub struct CreateFileTool;

impl CreateFileTool {
    /// Creates a new instance of the CreateFileTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for CreateFileTool {
    fn name(&self) -> &'static str {
        "create_file"
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
                    "description": "Path of the file to create"
                },
                "content": {
                    "type": "string",
                    "description": "Raw file content, written verbatim"
                },
                "xml_content": {
                    "type": "string",
                    "description": "Diff protocol directive with action=\"create_file\""
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
        let request: CreateFileRequest = BaseToolImpl::parse_arguments(arguments)?;
        tracing::debug!("Creating file {}", request.path);

        let result = context
            .editor
            .create_file(
                &request.path,
                request.content.as_deref(),
                request.xml_content.as_deref(),
            )
            .await;

        Ok(McpErrorHandler::into_result(result, self.name()))
    }
}
