//! Repository diff tool

use super::open_repository;
use crate::mcp::error_handling::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use code_assist_git::DiffRequest;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct GitDiffRequest {
    repo_path: Option<String>,
    path: Option<String>,
    #[serde(default)]
    cached: bool,
    #[serde(default)]
    staged: bool,
    commit: Option<String>,
    compare_to: Option<String>,
}

impl From<GitDiffRequest> for DiffRequest {
    fn from(request: GitDiffRequest) -> Self {
        Self {
            path: request.path,
            cached: request.cached || request.staged,
            commit: request.commit,
            compare_to: request.compare_to,
        }
    }
}

/// Tool for showing repository diffs
#[derive(Default)]
pub struct GitDiffTool;

impl GitDiffTool {
    /// Creates a new instance of the GitDiffTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for GitDiffTool {
    fn name(&self) -> &'static str {
        "git_diff"
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
                "path": {
                    "type": "string",
                    "description": "Limit the diff to this path"
                },
                "cached": {
                    "type": "boolean",
                    "description": "Compare against the index"
                },
                "staged": {
                    "type": "boolean",
                    "description": "Alias for cached"
                },
                "commit": {
                    "type": "string",
                    "description": "Base revision"
                },
                "compare_to": {
                    "type": "string",
                    "description": "Second revision to compare against"
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
        let request: GitDiffRequest = BaseToolImpl::parse_arguments(arguments)?;

        let git = match open_repository(context, request.repo_path.as_deref(), self.name()) {
            Ok(git) => git,
            Err(result) => return Ok(result),
        };

        let result = git.diff(&request.into()).map(|patch| {
            if patch.is_empty() {
                "No changes".to_string()
            } else {
                patch
            }
        });

        Ok(McpErrorHandler::into_result(result, self.name()))
    }
}
