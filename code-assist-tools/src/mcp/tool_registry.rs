//! Tool registry for MCP operations
//!
//! Every tool is a small struct implementing [`McpTool`]. Tools are grouped by
//! category and added to a [`ToolRegistry`] through `register_*_tools`
//! functions; the server looks them up by name on each `call_tool` request.
//!
//! ```rust,ignore
//! use async_trait::async_trait;
//! use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
//!
//! #[derive(Default)]
//! pub struct MyTool;
//!
//! #[async_trait]
//! impl McpTool for MyTool {
//!     fn name(&self) -> &'static str {
//!         "my_tool"
//!     }
//!
//!     fn description(&self) -> &'static str {
//!         include_str!("description.md")
//!     }
//!
//!     fn schema(&self) -> serde_json::Value {
//!         serde_json::json!({
//!             "type": "object",
//!             "properties": {
//!                 "path": {"type": "string", "description": "Target path"}
//!             },
//!             "required": ["path"]
//!         })
//!     }
//!
//!     async fn execute(
//!         &self,
//!         arguments: serde_json::Map<String, serde_json::Value>,
//!         context: &ToolContext,
//!     ) -> std::result::Result<CallToolResult, McpError> {
//!         let request: MyRequest = BaseToolImpl::parse_arguments(arguments)?;
//!         Ok(BaseToolImpl::create_success_response("done"))
//!     }
//! }
//! ```

use code_assist_config::CodeAssistConfig;
use code_assist_edit::{EditError, EditResult, FileEditor, PathResolver};
use code_assist_git::GitOperations;
use rmcp::model::{CallToolResult, Content, Tool};
use rmcp::ErrorData as McpError;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Context shared by all tools during execution
///
/// Built once per server from the loaded configuration. Cloning is cheap;
/// every field is shared.
#[derive(Clone)]
pub struct ToolContext {
    /// File mutation engine bound to the allowed roots
    pub editor: Arc<FileEditor>,
    /// Effective configuration
    pub config: Arc<CodeAssistConfig>,
    /// HTTP client for outbound requests
    pub http_client: reqwest::Client,
}

impl ToolContext {
    /// Create a new tool context
    pub fn new(editor: Arc<FileEditor>, config: Arc<CodeAssistConfig>) -> Self {
        Self {
            editor,
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Path resolver every path argument goes through
    pub fn resolver(&self) -> &PathResolver {
        self.editor.resolver()
    }

    /// Resolve a `repo_path` argument, defaulting to the first allowed root
    pub fn resolve_repo_path(&self, repo_path: Option<&str>) -> EditResult<PathBuf> {
        match repo_path {
            Some(path) => self.resolver().resolve(path),
            None => Ok(self.resolver().primary_root().to_path_buf()),
        }
    }

    /// Resolve a path argument that must name an existing directory
    pub fn resolve_directory(&self, path: &str) -> EditResult<PathBuf> {
        let target = self.resolver().resolve(path)?;
        if !target.exists() {
            return Err(EditError::NotFound { path: target });
        }
        if !target.is_dir() {
            return Err(EditError::invalid_request(format!(
                "'{}' is not a directory",
                target.display()
            )));
        }
        Ok(target)
    }

    /// Reject a repository whose working tree starts above the allowed roots
    ///
    /// Opening a repository searches parent directories; the working tree it
    /// finds must still lie inside a root.
    pub fn ensure_repository_allowed(&self, git: &GitOperations) -> EditResult<()> {
        let work_tree = git.repository().path();
        let resolved = work_tree
            .canonicalize()
            .unwrap_or_else(|_| work_tree.to_path_buf());
        if self.resolver().is_within_roots(&resolved) {
            Ok(())
        } else {
            Err(EditError::PathNotAllowed { path: resolved })
        }
    }
}

/// Trait implemented by every MCP tool
#[async_trait::async_trait]
pub trait McpTool: Send + Sync {
    /// Unique tool name, as called by clients
    fn name(&self) -> &'static str;

    /// Markdown description shown to clients
    ///
    /// Tools load this from a `description.md` next to their module.
    fn description(&self) -> &'static str;

    /// JSON Schema of the tool arguments
    fn schema(&self) -> serde_json::Value;

    /// Execute the tool
    ///
    /// Argument decoding problems are returned as `Err` (protocol errors).
    /// Failures of the operation itself are returned as `Ok` results with
    /// `is_error` set, rendered by [`McpErrorHandler`](super::error_handling::McpErrorHandler).
    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError>;
}

/// Registry for managing MCP tools
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn McpTool>>,
}

impl ToolRegistry {
    /// Create a new empty tool registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool, replacing any tool with the same name
    pub fn register<T: McpTool + 'static>(&mut self, tool: T) {
        let name = tool.name().to_string();
        self.tools.insert(name, Box::new(tool));
    }

    /// Get a tool by name
    pub fn get_tool(&self, name: &str) -> Option<&dyn McpTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    /// All registered tool names, sorted
    pub fn list_tool_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tools.keys().cloned().collect();
        names.sort();
        names
    }

    /// All registered tools as MCP `Tool` objects, sorted by name
    pub fn list_tools(&self) -> Vec<Tool> {
        let mut tools: Vec<Tool> = self
            .tools
            .values()
            .map(|tool| {
                let schema_map = match tool.schema() {
                    serde_json::Value::Object(map) => map,
                    _ => serde_json::Map::new(),
                };
                Tool::new(tool.name(), tool.description(), Arc::new(schema_map))
            })
            .collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

/// Common helpers for tool implementations
pub struct BaseToolImpl;

impl BaseToolImpl {
    /// Decode tool arguments into a typed request
    pub fn parse_arguments<T: serde::de::DeserializeOwned>(
        arguments: serde_json::Map<String, serde_json::Value>,
    ) -> std::result::Result<T, McpError> {
        serde_json::from_value(serde_json::Value::Object(arguments))
            .map_err(|e| McpError::invalid_params(format!("Invalid arguments: {e}"), None))
    }

    /// Successful text result
    pub fn create_success_response<T: Into<String>>(content: T) -> CallToolResult {
        CallToolResult::success(vec![Content::text(content.into())])
    }

    /// Failed text result, optionally with details appended
    pub fn create_error_response<T: Into<String>>(
        error: T,
        details: Option<String>,
    ) -> CallToolResult {
        let error_text = match details {
            Some(details) => format!("{}: {}", error.into(), details),
            None => error.into(),
        };
        CallToolResult::error(vec![Content::text(error_text)])
    }
}

/// Register file tools (create, modify, rewrite, delete, read, tree)
pub fn register_file_tools(registry: &mut ToolRegistry) {
    use super::tools::files;
    files::register_file_tools(registry);
}

/// Register directory tools (list, create)
pub fn register_directory_tools(registry: &mut ToolRegistry) {
    use super::tools::dirs;
    dirs::register_directory_tools(registry);
}

/// Register git inspection tools
pub fn register_git_tools(registry: &mut ToolRegistry) {
    use super::tools::git;
    git::register_git_tools(registry);
}

/// Register internet tools
pub fn register_internet_tools(registry: &mut ToolRegistry) {
    use super::tools::internet;
    internet::register_internet_tools(registry);
}

/// Register every tool the server offers
pub fn register_all_tools(registry: &mut ToolRegistry) {
    register_file_tools(registry);
    register_directory_tools(registry);
    register_git_tools(registry);
    register_internet_tools(registry);
    tracing::debug!("Registered {} tools", registry.len());
}
