//! Search and replace modification tool

use crate::mcp::error_handling::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use indexmap::IndexMap;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ModifyFileRequest {
    path: String,
    replacements: Option<IndexMap<String, String>>,
    xml_content: Option<String>,
}

/// Tool for exact search and replace edits
#[derive(Default)]
pub struct ModifyFileTool;

impl ModifyFileTool {
    /// Creates a new instance of the ModifyFileTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ModifyFileTool {
    fn name(&self) -> &'static str {
        "modify_file"
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
                    "description": "Path of the file to modify"
                },
                "replacements": {
                    "type": "object",
                    "description": "Search text to replacement text, applied in order",
                    "additionalProperties": {"type": "string"}
                },
                "xml_content": {
                    "type": "string",
                    "description": "Diff protocol directive with action=\"modify_file\""
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
        let request: ModifyFileRequest = BaseToolImpl::parse_arguments(arguments)?;

        let result = context
            .editor
            .modify_file(
                &request.path,
                request.replacements.as_ref(),
                request.xml_content.as_deref(),
            )
            .await;

        Ok(McpErrorHandler::into_result(result, self.name()))
    }
}
