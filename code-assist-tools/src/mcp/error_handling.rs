//! Rendering of operation failures into tool results
//!
//! Engine and git errors stay typed until they reach a tool. There they are
//! turned into a text result with `is_error` set, in the form
//! `Error in <operation>: <cause>`, so the calling agent can read and react
//! to them.

use super::tool_registry::BaseToolImpl;
use code_assist_common::{ErrorSeverity, Severity};
use rmcp::model::CallToolResult;
use tracing::{error, warn};

/// Converts typed errors into MCP tool results
pub struct McpErrorHandler;

impl McpErrorHandler {
    /// Log `err` at a level matching its severity and render it as a failed result
    pub fn handle_error<E>(err: E, operation: &str) -> CallToolResult
    where
        E: std::error::Error + Severity,
    {
        match err.severity() {
            ErrorSeverity::Warning => warn!(operation, "Rejected request: {err}"),
            ErrorSeverity::Error | ErrorSeverity::Critical => {
                error!(operation, severity = %err.severity(), "Operation failed: {err}")
            }
        }
        BaseToolImpl::create_error_response(format!("Error in {operation}"), Some(err.to_string()))
    }

    /// Render a `Result` from the engine: `Ok` text becomes a success result
    pub fn into_result<T, E>(result: Result<T, E>, operation: &str) -> CallToolResult
    where
        T: Into<String>,
        E: std::error::Error + Severity,
    {
        match result {
            Ok(text) => BaseToolImpl::create_success_response(text),
            Err(err) => Self::handle_error(err, operation),
        }
    }
}
