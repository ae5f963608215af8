//! Repository status tool

use super::open_repository;
use crate::mcp::error_handling::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct GitStatusRequest {
    repo_path: Option<String>,
}

/// Tool for showing repository status
#[derive(Default)]
pub struct GitStatusTool;

impl GitStatusTool {
    /// Creates a new instance of the GitStatusTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GitStatusTool {
    fn name(&self) -> &'static str {
        "git_status"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "repo_path": {
                    "type": "string",
                    "description": "Path inside the repository (defaults to the first allowed root)"
                }
            },
            "required": []
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: GitStatusRequest = BaseToolImpl::parse_arguments(arguments)?;

        let git = match open_repository(context, request.repo_path.as_deref(), self.name()) {
            Ok(git) => git,
            Err(result) => return Ok(result),
        };

        Ok(McpErrorHandler::into_result(git.status_report(), self.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{args, commit_file, create_test_context, result_text};

    #[tokio::test]
    async fn test_status_reports_untracked_and_clean() {
        let (temp, context) = create_test_context();
        let repo = git2::Repository::init(temp.path()).unwrap();
        commit_file(&repo, "README.md", "hello\n", "Initial commit");
        let branch = repo.head().unwrap().shorthand().unwrap().to_string();

        let result = GitStatusTool::new()
            .execute(serde_json::Map::new(), &context)
            .await
            .unwrap();
        assert_eq!(
            result_text(&result),
            format!("On branch {branch}\nnothing to commit, working tree clean\n")
        );

        std::fs::write(temp.path().join("notes.txt"), "scratch").unwrap();
        let result = GitStatusTool::new()
            .execute(args(serde_json::json!({"repo_path": "."})), &context)
            .await
            .unwrap();
        let text = result_text(&result);
        assert!(text.contains("Untracked files:\n  notes.txt\n"));
    }
}
