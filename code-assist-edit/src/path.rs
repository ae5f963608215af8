//! Path resolution and authorization against the allowed roots
//!
//! Every path that reaches the engine goes through [`PathResolver::resolve`].
//! Containment is component-wise: a root of `/home/u/proj` admits
//! `/home/u/proj/src/lib.rs` but not `/home/u/proj-evil/x`.

use crate::error::{EditError, EditResult};
use std::path::{Component, Path, PathBuf};
use tracing::debug;

/// Resolves caller paths to absolute paths inside the allowed roots
#[derive(Debug, Clone)]
pub struct PathResolver {
    roots: Vec<PathBuf>,
}

impl PathResolver {
    /// Create a resolver for the given roots
    ///
    /// Relative roots are taken relative to the current directory. Roots that
    /// exist are canonicalized so symlinked locations compare correctly.
    pub fn new<I, P>(roots: I) -> EditResult<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut resolved = Vec::new();
        for root in roots {
            let root = root.as_ref();
            let absolute = if root.is_absolute() {
                root.to_path_buf()
            } else {
                std::env::current_dir()
                    .map_err(|e| EditError::io("read current directory", root, e))?
                    .join(root)
            };
            resolved.push(canonicalize_existing_prefix(&normalize_lexically(&absolute))?);
        }

        if resolved.is_empty() {
            return Err(EditError::invalid_request(
                "at least one allowed root is required",
            ));
        }

        debug!(roots = ?resolved, "Configured allowed roots");
        Ok(Self { roots: resolved })
    }

    /// The allowed roots, in configuration order
    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// The first allowed root, used as the base for relative paths
    pub fn primary_root(&self) -> &Path {
        &self.roots[0]
    }

    /// Resolve `path` to an absolute path and check it is inside an allowed root
    ///
    /// Relative paths are joined onto [`primary_root`](Self::primary_root).
    /// `.` and `..` are collapsed before the check and the deepest existing
    /// ancestor is canonicalized, so neither traversal segments nor symlinks
    /// can step outside the roots.
    pub fn resolve<P: AsRef<Path>>(&self, path: P) -> EditResult<PathBuf> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(EditError::invalid_request("path must not be empty"));
        }

        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.primary_root().join(path)
        };
        let resolved = canonicalize_existing_prefix(&normalize_lexically(&absolute))?;

        if self.is_within_roots(&resolved) {
            Ok(resolved)
        } else {
            debug!(path = %resolved.display(), "Rejected path outside allowed roots");
            Err(EditError::PathNotAllowed { path: resolved })
        }
    }

    /// True if an already resolved path lies inside one of the roots
    pub fn is_within_roots(&self, resolved: &Path) -> bool {
        self.roots.iter().any(|root| resolved.starts_with(root))
    }
}

/// Collapse `.` and `..` components without touching the filesystem
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => normalized.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}

/// Canonicalize the longest existing ancestor of `path` and re-attach the rest
fn canonicalize_existing_prefix(path: &Path) -> EditResult<PathBuf> {
    for ancestor in path.ancestors() {
        if !ancestor.exists() {
            continue;
        }
        let canonical = ancestor
            .canonicalize()
            .map_err(|e| EditError::io("canonicalize", ancestor, e))?;
        return Ok(match path.strip_prefix(ancestor) {
            Ok(rest) if !rest.as_os_str().is_empty() => canonical.join(rest),
            _ => canonical,
        });
    }
    Ok(path.to_path_buf())
}
