//! MCP server implementation for file editing and repository inspection

use super::prompts;
use super::tool_registry::{register_all_tools, McpTool, ToolContext, ToolRegistry};
use crate::error::ServerResult;
use code_assist_config::CodeAssistConfig;
use code_assist_edit::{FileEditor, PathResolver};
use rmcp::model::*;
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use serde_json::Value;
use std::sync::Arc;

const SERVER_NAME: &str = "code-assist";

const SERVER_INSTRUCTIONS: &str = "Code Assist edits files inside the configured allowed roots. \
Use create_file, modify_file and rewrite_file with the XML diff protocol (see the code-assist-init prompt), \
read files with read_file, read_multiple_files, file_tree and list_directory, \
and inspect repositories with the git_* tools.";

fn create_server_implementation() -> Implementation {
    Implementation::new(SERVER_NAME, crate::VERSION)
        .with_title("Code Assist MCP Server")
        .with_description("XML-diff file editing and git inspection for AI agents")
}

/// MCP server wiring the tool registry and prompts to the protocol
#[derive(Clone)]
pub struct McpServer {
    tool_registry: Arc<ToolRegistry>,
    tool_context: Arc<ToolContext>,
}

impl McpServer {
    /// Create a server from the effective configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or none of the
    /// allowed roots can be resolved.
    pub fn new(config: CodeAssistConfig) -> ServerResult<Self> {
        config.validate()?;
        let roots = config.effective_allowed_roots()?;
        let resolver = PathResolver::new(&roots)?;
        let editor = FileEditor::new(resolver, config.trash_dir_name.clone());

        let mut tool_registry = ToolRegistry::new();
        register_all_tools(&mut tool_registry);

        tracing::info!(
            "Serving {} tools for roots {:?}",
            tool_registry.len(),
            editor.resolver().roots()
        );

        Ok(Self {
            tool_registry: Arc::new(tool_registry),
            tool_context: Arc::new(ToolContext::new(Arc::new(editor), Arc::new(config))),
        })
    }

    /// Context handed to every tool call
    pub fn tool_context(&self) -> &ToolContext {
        &self.tool_context
    }

    /// All registered tools, sorted by name
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tool_registry.list_tools()
    }

    /// Check whether a tool with this name is registered
    pub fn has_tool(&self, name: &str) -> bool {
        self.tool_registry.get_tool(name).is_some()
    }

    /// Execute a tool by name
    ///
    /// Non-object arguments are treated as an empty argument map.
    pub async fn execute_tool(
        &self,
        name: &str,
        arguments: Value,
    ) -> std::result::Result<CallToolResult, McpError> {
        let tool = self.tool_registry.get_tool(name).ok_or_else(|| {
            McpError::invalid_request(format!("Unknown tool: {}", name), None)
        })?;

        let arguments_map = match arguments {
            Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        Self::execute_tool_with_logging(tool, name, arguments_map, &self.tool_context).await
    }

    async fn execute_tool_with_logging(
        tool: &dyn McpTool,
        name: &str,
        arguments: serde_json::Map<String, Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        tracing::info!("🔧 Executing tool: {}", name);
        let result = tool.execute(arguments, context).await;
        match &result {
            Ok(call_result) if call_result.is_error == Some(true) => {
                tracing::debug!("🔧 Tool {} reported an error", name)
            }
            Ok(_) => tracing::debug!("🔧 Tool {} completed", name),
            Err(e) => tracing::warn!("🔧 Tool {} rejected the call: {}", name, e.message),
        }
        result
    }
}

impl ServerHandler for McpServer {
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult::with_all_items(prompts::list_prompts()))
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<GetPromptResult, McpError> {
        tracing::debug!("get_prompt() invoked for prompt: {}", request.name);
        prompts::get_prompt(&request.name, request.arguments.as_ref(), &self.tool_context)
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tool_registry.list_tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        tracing::debug!(
            "🔧 call_tool() invoked for tool: {}, arguments: {:?}",
            request.name,
            request.arguments
        );

        let tool = self.tool_registry.get_tool(&request.name).ok_or_else(|| {
            tracing::error!("🔧 Unknown tool requested: {}", request.name);
            McpError::invalid_request(format!("Unknown tool: {}", request.name), None)
        })?;

        let arguments = request.arguments.unwrap_or_default();
        Self::execute_tool_with_logging(tool, &request.name, arguments, &self.tool_context).await
    }

    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(
            ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .build(),
        )
        .with_protocol_version(ProtocolVersion::default())
        .with_server_info(create_server_implementation())
        .with_instructions(SERVER_INSTRUCTIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::result_text;
    use tempfile::TempDir;

    fn create_server() -> (TempDir, McpServer) {
        let temp = TempDir::new().unwrap();
        let config = CodeAssistConfig {
            allowed_roots: vec![temp.path().to_path_buf()],
            ..Default::default()
        };
        let server = McpServer::new(config).unwrap();
        (temp, server)
    }

    #[test]
    fn test_server_info() {
        let (_temp, server) = create_server();
        let info = server.get_info();

        assert_eq!(info.server_info.name, "code-assist");
        assert_eq!(info.server_info.version, crate::VERSION);
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.prompts.is_some());
        assert!(info.instructions.unwrap().contains("XML diff protocol"));
    }

    #[test]
    fn test_server_lists_all_tools() {
        let (_temp, server) = create_server();
        let tools = server.list_tools();

        assert_eq!(tools.len(), 14);
        assert!(server.has_tool("modify_file"));
        assert!(!server.has_tool("shell_execute"));
    }

    #[test]
    fn test_invalid_trash_dir_is_rejected() {
        let temp = TempDir::new().unwrap();
        let config = CodeAssistConfig {
            allowed_roots: vec![temp.path().to_path_buf()],
            trash_dir_name: "a/b".to_string(),
            ..Default::default()
        };
        assert!(McpServer::new(config).is_err());
    }

    #[tokio::test]
    async fn test_execute_unknown_tool() {
        let (_temp, server) = create_server();
        let err = server
            .execute_tool("nonexistent_tool", serde_json::json!({}))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INVALID_REQUEST);
        assert!(err.message.contains("Unknown tool: nonexistent_tool"));
    }

    #[tokio::test]
    async fn test_execute_tool_with_bad_arguments() {
        let (_temp, server) = create_server();
        let err = server
            .execute_tool("read_file", serde_json::json!({"path": 42}))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_execute_tool_end_to_end() {
        let (temp, server) = create_server();
        let path = temp.path().canonicalize().unwrap().join("hello.txt");

        let created = server
            .execute_tool(
                "create_file",
                serde_json::json!({"path": path.to_string_lossy(), "content": "Hello\n"}),
            )
            .await
            .unwrap();
        assert_eq!(
            result_text(&created),
            format!("Created file: {}", path.display())
        );

        let read = server
            .execute_tool("read_file", serde_json::json!({"path": "hello.txt"}))
            .await
            .unwrap();
        assert_eq!(result_text(&read), "Hello\n");
    }
}
