//! Cross-checks between a directive and the operation that received it

use crate::directive::{Action, Directive};
use crate::error::{EditError, EditResult};
use crate::path::PathResolver;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Check a directive against the invoked operation and the requested path
///
/// `requested` must already be resolved. The directive path is resolved the
/// same way, relative paths against the primary root, and has to land on the
/// same file. Returns the resolved target.
pub fn validate_directive(
    directive: &Directive,
    operation: Action,
    requested: &Path,
    resolver: &PathResolver,
) -> EditResult<PathBuf> {
    if directive.action != operation {
        warn!(
            declared = %directive.action,
            expected = %operation,
            "Directive action does not match operation"
        );
        return Err(EditError::ActionMismatch {
            declared: directive.action,
            expected: operation,
        });
    }

    let declared = resolver.resolve(&directive.path)?;
    if declared != requested {
        warn!(
            declared = %declared.display(),
            requested = %requested.display(),
            "Directive path does not match requested path"
        );
        return Err(EditError::PathMismatch {
            directive: declared,
            requested: requested.to_path_buf(),
        });
    }

    Ok(declared)
}
