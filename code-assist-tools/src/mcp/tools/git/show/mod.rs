//! Single commit display tool

use super::open_repository;
use crate::mcp::error_handling::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use code_assist_git::ShowFormat;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct GitShowRequest {
    repo_path: Option<String>,
    revision: Option<String>,
    format: Option<String>,
}

/// Tool for showing a single commit
#[derive(Default)]
pub struct GitShowTool;

impl GitShowTool {
    /// Creates a new instance of the GitShowTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GitShowTool {
    fn name(&self) -> &'static str {
        "git_show"
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
                "revision": {
                    "type": "string",
                    "description": "Commit to show (defaults to HEAD)"
                },
                "format": {
                    "type": "string",
                    "enum": ["oneline", "short", "medium", "full"],
                    "description": "Header layout"
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
        let request: GitShowRequest = BaseToolImpl::parse_arguments(arguments)?;

        let format = match request.format.as_deref().map(str::parse::<ShowFormat>) {
            None => ShowFormat::default(),
            Some(Ok(format)) => format,
            Some(Err(e)) => return Ok(McpErrorHandler::handle_error(e, self.name())),
        };

        let git = match open_repository(context, request.repo_path.as_deref(), self.name()) {
            Ok(git) => git,
            Err(result) => return Ok(result),
        };

        let result = git.show(request.revision.as_deref(), format);
        Ok(McpErrorHandler::into_result(result, self.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{args, commit_file, create_test_context, result_text};

    #[tokio::test]
    async fn test_show_head_with_patch() {
        let (temp, context) = create_test_context();
        let repo = git2::Repository::init(temp.path()).unwrap();
        commit_file(&repo, "a.txt", "one\n", "First");
        let second = commit_file(&repo, "a.txt", "two\n", "Replace one");

        let result = GitShowTool::new()
            .execute(args(serde_json::json!({"format": "oneline"})), &context)
            .await
            .unwrap();
        let text = result_text(&result);

        assert!(text.starts_with(&second.to_string()));
        assert!(text.contains("Replace one"));
        assert!(text.contains("-one"));
        assert!(text.contains("+two"));
    }

    #[tokio::test]
    async fn test_show_rejects_unknown_format() {
        let (temp, context) = create_test_context();
        let repo = git2::Repository::init(temp.path()).unwrap();
        commit_file(&repo, "a.txt", "one\n", "First");

        let result = GitShowTool::new()
            .execute(args(serde_json::json!({"format": "fancy"})), &context)
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).contains("Unknown show format 'fancy'"));
    }
}
