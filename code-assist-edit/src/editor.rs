//! The file editing service
//!
//! [`FileEditor`] ties the stages together: resolve the path, parse and
//! validate any directive, compute the new content, diff it against the old,
//! then persist. Every stage returns a typed error and nothing is written
//! unless all earlier stages succeed.

use crate::diff::unified_diff;
use crate::directive::{Action, Directive};
use crate::error::{EditError, EditResult};
use crate::mutator::apply_replacements;
use crate::path::PathResolver;
use crate::validator::validate_directive;
use crate::writer::{move_to_trash, read_or_empty, write_atomic, TrashLocation};
use dashmap::DashMap;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info};

/// Separator between files in [`FileEditor::read_multiple_files`] output
pub const READ_MULTIPLE_SEPARATOR: &str = "\n---\n";

/// File mutation service bound to a set of allowed roots
///
/// Mutations of the same resolved path are serialized within the process.
#[derive(Debug)]
pub struct FileEditor {
    resolver: PathResolver,
    trash_dir_name: String,
    locks: DashMap<PathBuf, Arc<Mutex<()>>>,
}

impl FileEditor {
    /// Create an editor for the given resolver and trash directory name
    pub fn new<S: Into<String>>(resolver: PathResolver, trash_dir_name: S) -> Self {
        Self {
            resolver,
            trash_dir_name: trash_dir_name.into(),
            locks: DashMap::new(),
        }
    }

    /// The path resolver used for every operation
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Name of the per-directory trash folder
    pub fn trash_dir_name(&self) -> &str {
        &self.trash_dir_name
    }

    /// Create (or overwrite) a file
    ///
    /// With `xml`, the directive must declare `create_file` for the same path
    /// and the content is built from its changes. Otherwise `content` is
    /// written verbatim. Parent directories are created.
    pub async fn create_file(
        &self,
        path: &str,
        content: Option<&str>,
        xml: Option<&str>,
    ) -> EditResult<String> {
        let target = self.resolver.resolve(path)?;
        let content = match xml {
            Some(xml) => self.directive_for(xml, Action::CreateFile, &target)?.content()?,
            None => content.unwrap_or_default().to_string(),
        };

        let _guard = self.lock(&target).await;
        write_atomic(&target, &content, true)?;

        info!(path = %target.display(), bytes = content.len(), "Created file");
        Ok(format!("Created file: {}", target.display()))
    }

    /// Apply search/replace pairs to a file and return the unified diff
    ///
    /// Exactly one of `replacements` and `xml` must be given. A missing file
    /// is treated as empty.
    pub async fn modify_file(
        &self,
        path: &str,
        replacements: Option<&IndexMap<String, String>>,
        xml: Option<&str>,
    ) -> EditResult<String> {
        let target = self.resolver.resolve(path)?;
        let replacements = match (replacements, xml) {
            (Some(replacements), None) => replacements.clone(),
            (None, Some(xml)) => self
                .directive_for(xml, Action::ModifyFile, &target)?
                .replacements()?,
            (Some(_), Some(_)) => {
                return Err(EditError::invalid_request(
                    "provide either replacements or xml_content, not both",
                ))
            }
            (None, None) => {
                return Err(EditError::invalid_request(
                    "either replacements or xml_content is required",
                ))
            }
        };

        let _guard = self.lock(&target).await;
        let original = read_or_empty(&target)?;
        let modified = apply_replacements(&original, &replacements)?;

        let diff = unified_diff(&original, &modified);
        if diff.is_empty() {
            debug!(path = %target.display(), "Replacements produced no changes");
            return Err(EditError::NoChangesDetected);
        }
        if modified.is_empty() {
            return Err(EditError::EmptyResult);
        }

        write_atomic(&target, &modified, false)?;
        info!(
            path = %target.display(),
            replacements = replacements.len(),
            "Modified file"
        );
        Ok(diff)
    }

    /// Replace a file's content entirely and return the unified diff
    pub async fn rewrite_file(
        &self,
        path: &str,
        content: Option<&str>,
        xml: Option<&str>,
    ) -> EditResult<String> {
        let target = self.resolver.resolve(path)?;
        let new_content = match (xml, content) {
            (Some(xml), _) => self
                .directive_for(xml, Action::RewriteFile, &target)?
                .content()?,
            (None, Some(content)) => content.to_string(),
            (None, None) => {
                return Err(EditError::invalid_request(
                    "either content or xml_content is required",
                ))
            }
        };

        let _guard = self.lock(&target).await;
        let original = read_or_empty(&target)?;

        let diff = unified_diff(&original, &new_content);
        if diff.is_empty() {
            return Err(EditError::NoChangesDetected);
        }

        write_atomic(&target, &new_content, false)?;
        info!(path = %target.display(), bytes = new_content.len(), "Rewrote file");
        Ok(diff)
    }

    /// Move a file into the trash directory beside it
    pub async fn delete_file(&self, path: &str) -> EditResult<TrashLocation> {
        let target = self.resolver.resolve(path)?;

        let _guard = self.lock(&target).await;
        let location = move_to_trash(&target, &self.trash_dir_name, chrono::Local::now())?;

        info!(
            path = %target.display(),
            trash = %location.trashed.display(),
            "Moved file to trash"
        );
        Ok(location)
    }

    /// Read a file inside the allowed roots
    pub fn read_file(&self, path: &str) -> EditResult<String> {
        let target = self.resolver.resolve(path)?;
        if !target.is_file() {
            return Err(EditError::NotFound { path: target });
        }
        std::fs::read_to_string(&target).map_err(|e| EditError::io("read", target, e))
    }

    /// Read several files; a failure is reported in place of that file's content
    pub fn read_multiple_files<S: AsRef<str>>(&self, paths: &[S]) -> String {
        paths
            .iter()
            .map(|path| {
                let path = path.as_ref();
                match self.read_file(path) {
                    Ok(content) => format!("{path}:\n{content}"),
                    Err(e) => format!("{path}:\nError - {e}"),
                }
            })
            .collect::<Vec<_>>()
            .join(READ_MULTIPLE_SEPARATOR)
    }

    fn directive_for(&self, xml: &str, operation: Action, target: &Path) -> EditResult<Directive> {
        let directive = Directive::parse(xml)?;
        validate_directive(&directive, operation, target, &self.resolver)?;
        debug!(
            action = %directive.action,
            changes = directive.changes.len(),
            "Accepted directive"
        );
        Ok(directive)
    }

    async fn lock(&self, path: &Path) -> PathLockGuard<'_> {
        let lock = self.locks.entry(path.to_path_buf()).or_default().clone();
        PathLockGuard {
            guard: Some(lock.lock_owned().await),
            locks: &self.locks,
            path: path.to_path_buf(),
        }
    }
}

/// Exclusive hold on one path; the map entry is dropped with the last holder
struct PathLockGuard<'a> {
    guard: Option<OwnedMutexGuard<()>>,
    locks: &'a DashMap<PathBuf, Arc<Mutex<()>>>,
    path: PathBuf,
}

impl Drop for PathLockGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Waiters clone the Arc under the shard lock, so a count of one means
        // nobody else can be queued on this mutex.
        self.locks
            .remove_if(&self.path, |_, lock| Arc::strong_count(lock) == 1);
    }
}
