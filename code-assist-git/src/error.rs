//! Git-specific error types

use code_assist_common::{ErrorSeverity, Severity};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for Git operations
pub type GitResult<T> = Result<T, GitError>;

/// Git error types
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GitError {
    /// Repository not found or invalid
    #[error("Git repository not found at '{path}': {details}")]
    RepositoryNotFound { path: PathBuf, details: String },

    /// A revision string did not name an object of the expected kind
    #[error("Invalid revision '{revision}': {source}")]
    InvalidRevision {
        revision: String,
        #[source]
        source: git2::Error,
    },

    /// Unknown `git show` format name
    #[error("Unknown show format '{format}' (expected oneline, short, medium or full)")]
    InvalidShowFormat { format: String },

    /// Git2 library error
    #[error("Git2 operation '{operation}' failed: {source}")]
    Git2Error {
        operation: String,
        #[source]
        source: git2::Error,
    },
}

impl GitError {
    /// Create a repository not found error
    pub fn repository_not_found<P: Into<PathBuf>>(path: P, details: String) -> Self {
        Self::RepositoryNotFound {
            path: path.into(),
            details,
        }
    }

    /// Create an invalid revision error
    pub fn invalid_revision<S: Into<String>>(revision: S, source: git2::Error) -> Self {
        Self::InvalidRevision {
            revision: revision.into(),
            source,
        }
    }

    /// Create a git2 error with operation context
    pub fn from_git2(operation: String, error: git2::Error) -> Self {
        Self::Git2Error {
            operation,
            source: error,
        }
    }
}

impl Severity for GitError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            GitError::RepositoryNotFound { .. }
            | GitError::InvalidRevision { .. }
            | GitError::InvalidShowFormat { .. } => ErrorSeverity::Error,
            GitError::Git2Error { .. } => ErrorSeverity::Critical,
        }
    }
}

/// Convert git2::Error to GitError with operation context
pub fn convert_git2_error(operation: &str, error: git2::Error) -> GitError {
    GitError::from_git2(operation.to_string(), error)
}
