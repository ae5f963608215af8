//! Error types for the file mutation engine

use crate::directive::Action;
use code_assist_common::{ErrorSeverity, Severity};
use std::path::PathBuf;
use thiserror::Error;

/// Result type for edit operations
pub type EditResult<T> = Result<T, EditError>;

/// Errors produced while parsing, validating, applying or persisting an edit
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EditError {
    /// The directive text is not well-formed XML
    #[error("Malformed XML: {message}")]
    MalformedXml { message: String },

    /// The XML is well-formed but does not follow the diff protocol
    #[error("Invalid directive: {message}")]
    InvalidDirective { message: String },

    /// The directive declares a different action than the invoked operation
    #[error("Action mismatch: directive declares '{declared}' but the operation is '{expected}'")]
    ActionMismatch { declared: Action, expected: Action },

    /// The directive path resolves somewhere other than the requested path
    #[error(
        "Path mismatch: directive path '{}' does not match requested path '{}'",
        .directive.display(),
        .requested.display()
    )]
    PathMismatch {
        directive: PathBuf,
        requested: PathBuf,
    },

    /// The path is outside every allowed root
    #[error("Path not allowed: '{}' is outside the allowed roots", .path.display())]
    PathNotAllowed { path: PathBuf },

    /// No change in the directive carried any content
    #[error("No content found in directive")]
    EmptyContent,

    /// Applying the replacements left the file empty
    #[error("Resulting content is empty")]
    EmptyResult,

    /// The edit would not change the file
    #[error("No changes detected")]
    NoChangesDetected,

    /// The target does not exist or is not a regular file
    #[error("File not found: '{}'", .path.display())]
    NotFound { path: PathBuf },

    /// The request parameters are inconsistent
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// Filesystem failure
    #[error("Failed to {operation} '{}': {source}", .path.display())]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl EditError {
    /// Create a malformed XML error
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedXml {
            message: message.into(),
        }
    }

    /// Create an invalid directive error
    pub fn invalid_directive<S: Into<String>>(message: S) -> Self {
        Self::InvalidDirective {
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Wrap an I/O error with the operation and path it occurred on
    pub fn io<P: Into<PathBuf>>(operation: &'static str, path: P, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }
}

impl Severity for EditError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            EditError::Io { .. } => ErrorSeverity::Critical,
            EditError::PathNotAllowed { .. } => ErrorSeverity::Error,
            EditError::MalformedXml { .. }
            | EditError::InvalidDirective { .. }
            | EditError::ActionMismatch { .. }
            | EditError::PathMismatch { .. }
            | EditError::EmptyContent
            | EditError::EmptyResult
            | EditError::NoChangesDetected
            | EditError::NotFound { .. }
            | EditError::InvalidRequest { .. } => ErrorSeverity::Warning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EditError::ActionMismatch {
            declared: Action::CreateFile,
            expected: Action::ModifyFile,
        };
        assert_eq!(
            err.to_string(),
            "Action mismatch: directive declares 'create_file' but the operation is 'modify_file'"
        );

        let err = EditError::PathNotAllowed {
            path: PathBuf::from("/etc/passwd"),
        };
        assert!(err.to_string().contains("/etc/passwd"));
        assert_eq!(EditError::NoChangesDetected.to_string(), "No changes detected");
    }

    #[test]
    fn test_severity_classification() {
        assert_eq!(
            EditError::NoChangesDetected.severity(),
            ErrorSeverity::Warning
        );
        assert_eq!(
            EditError::PathNotAllowed {
                path: PathBuf::from("/x")
            }
            .severity(),
            ErrorSeverity::Error
        );
        let io = EditError::io(
            "write",
            "/x",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(io.is_critical());
    }
}
