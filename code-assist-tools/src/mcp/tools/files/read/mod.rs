//! File reading tool

use crate::mcp::error_handling::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ReadFileRequest {
    path: String,
}

/// Tool for reading a single file
#[derive(Default)]
pub struct ReadFileTool;

impl ReadFileTool {
    /// Creates a new instance of the ReadFileTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ReadFileTool {
    fn name(&self) -> &'static str {
        "read_file"
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
                    "description": "Path of the file to read"
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
        let request: ReadFileRequest = BaseToolImpl::parse_arguments(arguments)?;
        let result = context.editor.read_file(&request.path);
        Ok(McpErrorHandler::into_result(result, self.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{args, create_test_context, result_text};

    #[tokio::test]
    async fn test_read_relative_path() {
        let (temp, context) = create_test_context();
        std::fs::write(temp.path().join("notes.md"), "# Notes\n").unwrap();

        let result = ReadFileTool::new()
            .execute(args(serde_json::json!({"path": "notes.md"})), &context)
            .await
            .unwrap();

        assert_eq!(result_text(&result), "# Notes\n");
    }
}
