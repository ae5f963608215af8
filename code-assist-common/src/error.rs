//! Error classification shared across Code Assist crates
//!
//! Domain crates define their own `thiserror` enums. This module gives them a
//! common vocabulary for how bad a failure is, and a formatter for printing a
//! full `source()` chain at the binary boundary.

use std::fmt;

/// Severity levels for error classification
///
/// - **Warning**: the request was rejected but nothing is wrong with the system,
///   for example an edit that would not change anything.
/// - **Error**: the operation failed and the caller has to fix the request.
/// - **Critical**: the environment is broken (unreadable repository, I/O failure
///   while writing).
///
/// ```rust
/// use code_assist_common::ErrorSeverity;
///
/// let no_op_edit = ErrorSeverity::Warning;
/// assert_ne!(no_op_edit, ErrorSeverity::Critical);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Request rejected, system healthy
    Warning,
    /// Operation failed, system can continue
    Error,
    /// Environment problem that needs attention
    Critical,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorSeverity::Warning => "warning",
            ErrorSeverity::Error => "error",
            ErrorSeverity::Critical => "critical",
        };
        f.write_str(label)
    }
}

/// Trait for error types that have severity levels
///
/// ```rust
/// use code_assist_common::{ErrorSeverity, Severity};
///
/// #[derive(Debug)]
/// enum MyError {
///     Corrupted,
///     NotFound,
///     NothingToDo,
/// }
///
/// impl Severity for MyError {
///     fn severity(&self) -> ErrorSeverity {
///         match self {
///             MyError::Corrupted => ErrorSeverity::Critical,
///             MyError::NotFound => ErrorSeverity::Error,
///             MyError::NothingToDo => ErrorSeverity::Warning,
///         }
///     }
/// }
///
/// assert_eq!(MyError::NotFound.severity(), ErrorSeverity::Error);
/// ```
pub trait Severity {
    /// Get the severity level of this error
    fn severity(&self) -> ErrorSeverity;

    /// True when the error points at the environment rather than the request
    fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Critical
    }
}

/// Error chain formatter for detailed error reporting
pub struct ErrorChain<'a>(&'a dyn std::error::Error);

impl<'a> ErrorChain<'a> {
    /// Wrap an error trait object, such as the one behind an `anyhow::Error`
    pub fn new(error: &'a dyn std::error::Error) -> Self {
        Self(error)
    }
}

impl fmt::Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Error: {}", self.0)?;

        let mut current = self.0.source();
        let mut level = 1;

        while let Some(err) = current {
            writeln!(f, "{:indent$}Caused by: {}", "", err, indent = level * 2)?;
            current = err.source();
            level += 1;
        }

        Ok(())
    }
}

/// Extension trait for error types to format the full error chain
pub trait ErrorChainExt {
    /// Format the full error chain
    fn error_chain(&self) -> ErrorChain<'_>;
}

impl<E: std::error::Error> ErrorChainExt for E {
    fn error_chain(&self) -> ErrorChain<'_> {
        ErrorChain(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Outer(Inner);

    #[derive(Debug)]
    struct Inner;

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "outer failed")
        }
    }

    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "inner failed")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    impl std::error::Error for Inner {}

    #[test]
    fn test_error_chain_lists_every_cause() {
        let err = Outer(Inner);
        let rendered = err.error_chain().to_string();

        assert_eq!(rendered, "Error: outer failed\n  Caused by: inner failed\n");
    }

    #[test]
    fn test_error_chain_from_trait_object() {
        let boxed: Box<dyn std::error::Error> = Box::new(Outer(Inner));
        let rendered = ErrorChain::new(boxed.as_ref()).to_string();

        assert!(rendered.ends_with("Caused by: inner failed\n"));
    }

    #[test]
    fn test_severity_ordering() {
        assert!(ErrorSeverity::Warning < ErrorSeverity::Error);
        assert!(ErrorSeverity::Error < ErrorSeverity::Critical);
    }

    #[test]
    fn test_is_critical_default_method() {
        #[derive(Debug)]
        enum TestError {
            Broken,
            Rejected,
        }

        impl Severity for TestError {
            fn severity(&self) -> ErrorSeverity {
                match self {
                    TestError::Broken => ErrorSeverity::Critical,
                    TestError::Rejected => ErrorSeverity::Warning,
                }
            }
        }

        assert!(TestError::Broken.is_critical());
        assert!(!TestError::Rejected.is_critical());
    }

    #[test]
    fn test_severity_display() {
        assert_eq!(ErrorSeverity::Warning.to_string(), "warning");
        assert_eq!(ErrorSeverity::Critical.to_string(), "critical");
    }
}
