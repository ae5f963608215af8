//! Git inspection tools
//!
//! Read-only views of the repository containing `repo_path` (default: the
//! first allowed root): `git_status`, `git_diff`, `git_log` and `git_show`.

pub mod diff;
pub mod log;
pub mod show;
pub mod status;

use crate::mcp::error_handling::McpErrorHandler;
use crate::mcp::tool_registry::{ToolContext, ToolRegistry};
use code_assist_git::GitOperations;
use rmcp::model::CallToolResult;

/// Register all git tools with the registry
pub fn register_git_tools(registry: &mut ToolRegistry) {
    registry.register(status::GitStatusTool::new());
    registry.register(diff::GitDiffTool::new());
    registry.register(log::GitLogTool::new());
    registry.register(show::GitShowTool::new());
}

/// Open the repository for a tool call
///
/// Failures come back already rendered as an error result.
pub(crate) fn open_repository(
    context: &ToolContext,
    repo_path: Option<&str>,
    operation: &str,
) -> Result<GitOperations, CallToolResult> {
    let work_dir = context
        .resolve_repo_path(repo_path)
        .map_err(|e| McpErrorHandler::handle_error(e, operation))?;
    let git = GitOperations::with_work_dir(work_dir)
        .map_err(|e| McpErrorHandler::handle_error(e, operation))?;
    context
        .ensure_repository_allowed(&git)
        .map_err(|e| McpErrorHandler::handle_error(e, operation))?;
    Ok(git)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_context, result_text};

    #[test]
    fn test_register_git_tools() {
        let mut registry = ToolRegistry::new();
        register_git_tools(&mut registry);

        assert_eq!(
            registry.list_tool_names(),
            vec!["git_diff", "git_log", "git_show", "git_status"]
        );
    }

    #[test]
    fn test_open_repository_outside_repo() {
        let (_temp, context) = create_test_context();

        let result = open_repository(&context, None, "git_status").unwrap_err();
        assert_eq!(result.is_error, Some(true));
        assert!(result_text(&result).starts_with("Error in git_status: Git repository not found"));
    }

    #[test]
    fn test_open_repository_rejects_paths_outside_roots() {
        let (_temp, context) = create_test_context();

        let result = open_repository(&context, Some("/"), "git_log").unwrap_err();
        assert!(result_text(&result).contains("Path not allowed"));
    }
}
