//! Errors raised while setting up or running the server

use code_assist_common::{ErrorSeverity, Severity};
use code_assist_config::ConfigError;
use code_assist_edit::EditError;
use thiserror::Error;

/// Result type for server setup and lifecycle
pub type ServerResult<T> = Result<T, ServerError>;

/// Server setup and lifecycle errors
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration could not be loaded or is invalid
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The allowed roots could not be turned into a path resolver
    #[error("Invalid allowed roots: {0}")]
    Roots(#[from] EditError),

    /// The MCP transport failed
    #[error("MCP server error: {message}")]
    Transport { message: String },
}

impl Severity for ServerError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ServerError::Config(e) => e.severity(),
            ServerError::Roots(_) => ErrorSeverity::Error,
            ServerError::Transport { .. } => ErrorSeverity::Critical,
        }
    }
}
