//! Commit history tool

use super::open_repository;
use crate::mcp::error_handling::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

const DEFAULT_MAX_COUNT: usize = 10;

fn default_max_count() -> usize {
    DEFAULT_MAX_COUNT
}

#[derive(Debug, Deserialize)]
struct GitLogRequest {
    repo_path: Option<String>,
    #[serde(default = "default_max_count")]
    max_count: usize,
}

/// Tool for showing commit history
#[derive(Default)]
pub struct GitLogTool;

impl GitLogTool {
    /// Creates a new instance of the GitLogTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GitLogTool {
    fn name(&self) -> &'static str {
        "git_log"
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
                },
                "max_count": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Maximum number of commits to show",
                    "default": DEFAULT_MAX_COUNT
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
        let request: GitLogRequest = BaseToolImpl::parse_arguments(arguments)?;

        let git = match open_repository(context, request.repo_path.as_deref(), self.name()) {
            Ok(git) => git,
            Err(result) => return Ok(result),
        };

        let result = git.log(request.max_count).map(|commits| {
            if commits.is_empty() {
                "No commits yet".to_string()
            } else {
                commits
                    .iter()
                    .map(|commit| commit.log_entry())
                    .collect::<Vec<_>>()
                    .join("\n")
            }
        });

        Ok(McpErrorHandler::into_result(result, self.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{args, commit_file, create_test_context, result_text};

    #[tokio::test]
    async fn test_log_newest_first_with_limit() {
        let (temp, context) = create_test_context();
        let repo = git2::Repository::init(temp.path()).unwrap();
        commit_file(&repo, "a.txt", "1", "First");
        commit_file(&repo, "a.txt", "2", "Second");
        let third = commit_file(&repo, "a.txt", "3", "Third");

        let result = GitLogTool::new()
            .execute(args(serde_json::json!({"max_count": 2})), &context)
            .await
            .unwrap();
        let text = result_text(&result);

        assert!(text.starts_with(&format!("Commit: {third}\nAuthor: Test User <test@example.com>\nDate: ")));
        assert!(text.contains("Message: Third\n\nCommit: "));
        assert!(text.contains("Message: Second\n"));
        assert!(!text.contains("First"));
    }

    #[tokio::test]
    async fn test_log_of_empty_repository() {
        let (temp, context) = create_test_context();
        git2::Repository::init(temp.path()).unwrap();

        let result = GitLogTool::new()
            .execute(serde_json::Map::new(), &context)
            .await
            .unwrap();
        assert_eq!(result_text(&result), "No commits yet");
    }
}
