//! Multi-file reading tool

use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ReadMultipleFilesRequest {
    paths: Vec<String>,
}

/// Tool for reading several files at once
#[derive(Default)]
pub struct ReadMultipleFilesTool;

impl ReadMultipleFilesTool {
    /// Creates a new instance of the ReadMultipleFilesTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ReadMultipleFilesTool {
    fn name(&self) -> &'static str {
        "read_multiple_files"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "paths": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "Paths of the files to read"
                }
            },
            "required": ["paths"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: ReadMultipleFilesRequest = BaseToolImpl::parse_arguments(arguments)?;
        let output = context.editor.read_multiple_files(&request.paths);
        Ok(BaseToolImpl::create_success_response(output))
    }
}
