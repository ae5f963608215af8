//! Git repository management

use crate::error::{convert_git2_error, GitError, GitResult};
use git2::Repository;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Wrapper around git2::Repository that remembers its working tree root
pub struct GitRepository {
    repo: Repository,
    path: PathBuf,
}

impl std::fmt::Debug for GitRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitRepository")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl GitRepository {
    /// Open the repository containing `path`, walking up parent directories
    pub fn open<P: AsRef<Path>>(path: P) -> GitResult<Self> {
        let path = path.as_ref();
        debug!("Opening git repository at: {}", path.display());

        let repo = Repository::discover(path).map_err(|e| {
            let error_msg = match e.code() {
                git2::ErrorCode::NotFound => format!(
                    "'{}' is not inside a git repository, or the path does not exist.",
                    path.display()
                ),
                git2::ErrorCode::Invalid => format!(
                    "Invalid git repository at '{}'. The repository may be corrupted.",
                    path.display()
                ),
                _ => format!(
                    "Failed to open git repository at '{}'. Git2 error: {}",
                    path.display(),
                    e
                ),
            };

            warn!("Repository open failed: {}", error_msg);
            GitError::repository_not_found(path, error_msg)
        })?;

        let repo_path = repo
            .workdir()
            .or_else(|| repo.path().parent())
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| path.to_path_buf());

        debug!("Opened repository at: {}", repo_path.display());

        Ok(Self {
            repo,
            path: repo_path,
        })
    }

    /// Initialize a new git repository
    pub fn init<P: AsRef<Path>>(path: P) -> GitResult<Self> {
        let path = path.as_ref();
        debug!("Initializing git repository at: {}", path.display());

        let repo = Repository::init(path).map_err(|e| convert_git2_error("init_repository", e))?;
        let repo_path = repo
            .workdir()
            .map(|p| p.to_path_buf())
            .unwrap_or_else(|| path.to_path_buf());

        Ok(Self {
            repo,
            path: repo_path,
        })
    }

    /// Get the underlying git2::Repository
    pub fn inner(&self) -> &Repository {
        &self.repo
    }

    /// Path to the working tree root
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// True if HEAD does not point at a commit yet
    pub fn is_empty(&self) -> bool {
        self.repo.is_empty().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_discovers_from_subdirectory() {
        let temp = TempDir::new().unwrap();
        GitRepository::init(temp.path()).unwrap();
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let repo = GitRepository::open(&nested).unwrap();

        assert_eq!(
            repo.path().canonicalize().unwrap(),
            temp.path().canonicalize().unwrap()
        );
        assert!(repo.is_empty());
    }

    #[test]
    fn test_open_outside_repository_fails() {
        let temp = TempDir::new().unwrap();
        let err = GitRepository::open(temp.path()).unwrap_err();
        assert!(matches!(err, GitError::RepositoryNotFound { .. }));
    }
}
