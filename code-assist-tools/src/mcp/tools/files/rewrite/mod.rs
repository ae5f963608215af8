//! Whole-file rewrite tool

use crate::mcp::error_handling::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RewriteFileRequest {
    path: String,
    content: Option<String>,
    xml_content: Option<String>,
}

/// Tool for replacing a file's content
#[derive(Default)]
pub struct RewriteFileTool;

impl RewriteFileTool {
    /// Creates a new instance of the RewriteFileTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for RewriteFileTool {
    fn name(&self) -> &'static str {
        "rewrite_file"
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
                    "description": "Path of the file to rewrite"
                },
                "content": {
                    "type": "string",
                    "description": "New raw content, written verbatim"
                },
                "xml_content": {
                    "type": "string",
                    "description": "Diff protocol directive with action=\"rewrite_file\""
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
        let request: RewriteFileRequest = BaseToolImpl::parse_arguments(arguments)?;

        let result = context
            .editor
            .rewrite_file(
                &request.path,
                request.content.as_deref(),
                request.xml_content.as_deref(),
            )
            .await;

        Ok(McpErrorHandler::into_result(result, self.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{args, create_test_context, result_text};

    #[tokio::test]
    async fn test_rewrite_requires_content_or_xml() {
        let (temp, context) = create_test_context();
        let path = temp.path().canonicalize().unwrap().join("a.txt");
        std::fs::write(&path, "x").unwrap();

        let result = RewriteFileTool::new()
            .execute(
                args(serde_json::json!({"path": path.to_string_lossy()})),
                &context,
            )
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).starts_with("Error in rewrite_file: Invalid request"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "x");
    }

    #[tokio::test]
    async fn test_rewrite_with_raw_content() {
        let (temp, context) = create_test_context();
        let path = temp.path().canonicalize().unwrap().join("a.txt");
        std::fs::write(&path, "old\n").unwrap();

        let result = RewriteFileTool::new()
            .execute(
                args(serde_json::json!({"path": path.to_string_lossy(), "content": "new\n"})),
                &context,
            )
            .await
            .unwrap();

        let diff = result_text(&result);
        assert!(diff.contains("-old"));
        assert!(diff.contains("+new"));
    }
}
