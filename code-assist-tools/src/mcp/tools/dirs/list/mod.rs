//! Directory listing tool

use crate::mcp::error_handling::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use code_assist_edit::{EditError, EditResult};
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ListDirectoryRequest {
    path: String,
}

/// Tool for listing a directory
#[derive(Default)]
pub struct ListDirectoryTool;

impl ListDirectoryTool {
    /// Creates a new instance of the ListDirectoryTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for ListDirectoryTool {
    fn name(&self) -> &'static str {
        "list_directory"
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
                    "description": "Directory to list"
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
        let request: ListDirectoryRequest = BaseToolImpl::parse_arguments(arguments)?;

        let result = context
            .resolve_directory(&request.path)
            .and_then(|target| list_entries(&target));

        Ok(McpErrorHandler::into_result(result, self.name()))
    }
}

fn list_entries(directory: &Path) -> EditResult<String> {
    let entries =
        std::fs::read_dir(directory).map_err(|e| EditError::io("list", directory, e))?;

    let mut directories = Vec::new();
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| EditError::io("list", directory, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.path().is_dir() {
            directories.push(format!("{name}/"));
        } else {
            files.push(name);
        }
    }

    directories.sort();
    files.sort();
    directories.extend(files);
    Ok(directories.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{args, create_test_context, result_text};
    use std::fs;

    #[tokio::test]
    async fn test_directories_first_then_files() {
        let (temp, context) = create_test_context();
        let root = temp.path();
        fs::create_dir(root.join("tests")).unwrap();
        fs::create_dir(root.join("src")).unwrap();
        fs::write(root.join("README.md"), "").unwrap();
        fs::write(root.join("Cargo.toml"), "").unwrap();

        let result = ListDirectoryTool::new()
            .execute(args(serde_json::json!({"path": "."})), &context)
            .await
            .unwrap();

        assert_eq!(result_text(&result), "src/\ntests/\nCargo.toml\nREADME.md");
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_error() {
        let (_temp, context) = create_test_context();

        let result = ListDirectoryTool::new()
            .execute(args(serde_json::json!({"path": "nowhere"})), &context)
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).starts_with("Error in list_directory: File not found"));
    }
}
