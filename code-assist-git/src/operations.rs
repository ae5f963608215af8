//! Git operations implementation
//!
//! [`GitOperations`] answers the read-only questions the tool layer asks:
//! what changed, what the history looks like, and which files are tracked.

use crate::error::{convert_git2_error, GitError, GitResult};
use crate::repository::GitRepository;
use crate::types::{CommitInfo, DiffRequest, ShowFormat, StatusSummary};
use git2::{Commit, Diff, DiffFormat, DiffOptions, Sort, StatusOptions, Tree};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main struct for performing Git operations
#[derive(Debug)]
pub struct GitOperations {
    repo: GitRepository,
    work_dir: PathBuf,
}

impl GitOperations {
    /// Create a GitOperations instance for the repository containing `work_dir`
    pub fn with_work_dir<P: Into<PathBuf>>(work_dir: P) -> GitResult<Self> {
        let work_dir = work_dir.into();
        debug!(
            "Creating GitOperations for directory: {}",
            work_dir.display()
        );

        let repo = GitRepository::open(&work_dir)?;

        Ok(Self { repo, work_dir })
    }

    /// Get the repository instance
    pub fn repository(&self) -> &GitRepository {
        &self.repo
    }

    /// Get the working directory path this instance was created for
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Name of the checked out branch, `None` when HEAD is detached
    ///
    /// Works on unborn branches (fresh repositories without commits).
    pub fn current_branch(&self) -> GitResult<Option<String>> {
        let repo = self.repo.inner();
        let head = repo
            .find_reference("HEAD")
            .map_err(|e| convert_git2_error("find_head", e))?;

        Ok(head
            .symbolic_target()
            .and_then(|target| target.strip_prefix("refs/heads/"))
            .map(str::to_string))
    }

    /// Get the repository status
    pub fn get_status(&self) -> GitResult<StatusSummary> {
        let repo = self.repo.inner();
        let mut opts = StatusOptions::new();
        opts.include_untracked(true);
        opts.recurse_untracked_dirs(true);
        opts.include_ignored(false);

        let statuses = repo
            .statuses(Some(&mut opts))
            .map_err(|e| convert_git2_error("get_status", e))?;

        let mut summary = StatusSummary::new();

        for entry in statuses.iter() {
            let path = entry.path().unwrap_or("<unknown>").to_string();
            let status = entry.status();

            if status.contains(git2::Status::INDEX_MODIFIED) {
                summary.staged_modified.push(path.clone());
            }
            if status.contains(git2::Status::WT_MODIFIED) {
                summary.unstaged_modified.push(path.clone());
            }
            if status.contains(git2::Status::WT_NEW) {
                summary.untracked.push(path.clone());
            }
            if status.contains(git2::Status::INDEX_NEW) {
                summary.staged_new.push(path.clone());
            }
            if status.contains(git2::Status::INDEX_DELETED) {
                summary.staged_deleted.push(path.clone());
            }
            if status.contains(git2::Status::WT_DELETED) {
                summary.unstaged_deleted.push(path.clone());
            }
            if status.contains(git2::Status::INDEX_RENAMED) {
                summary.renamed.push(path.clone());
            }
            if status.contains(git2::Status::INDEX_TYPECHANGE) {
                summary.staged_typechange.push(path.clone());
            }
            if status.contains(git2::Status::WT_RENAMED) {
                summary.unstaged_renamed.push(path.clone());
            }
            if status.contains(git2::Status::WT_TYPECHANGE) {
                summary.unstaged_typechange.push(path.clone());
            }
            if status.contains(git2::Status::CONFLICTED) {
                summary.conflicted.push(path);
            }
        }

        Ok(summary)
    }

    /// Human-readable status: branch line followed by the grouped summary
    pub fn status_report(&self) -> GitResult<String> {
        let branch_line = match self.current_branch()? {
            Some(branch) => format!("On branch {branch}"),
            None => "HEAD detached".to_string(),
        };
        let summary = self.get_status()?;
        Ok(format!("{branch_line}\n{summary}"))
    }

    /// Patch text for the comparison described by `request`
    ///
    /// | request                      | compares                      |
    /// |------------------------------|-------------------------------|
    /// | default                      | index vs working tree         |
    /// | `cached`                     | HEAD vs index                 |
    /// | `commit`                     | commit vs working tree        |
    /// | `commit` + `cached`          | commit vs index               |
    /// | `commit` + `compare_to`      | commit vs `compare_to`        |
    pub fn diff(&self, request: &DiffRequest) -> GitResult<String> {
        let repo = self.repo.inner();
        let mut opts = DiffOptions::new();
        if let Some(path) = request.path.as_deref() {
            opts.pathspec(path);
        }

        // A lone compare_to behaves like a single revision argument.
        let (base, other) = match (request.commit.as_deref(), request.compare_to.as_deref()) {
            (None, Some(rev)) => (Some(rev), None),
            pair => pair,
        };

        debug!(?base, ?other, cached = request.cached, "Computing git diff");

        let diff = match (base, other) {
            (Some(base), Some(other)) => {
                let old_tree = self.resolve_tree(base)?;
                let new_tree = self.resolve_tree(other)?;
                repo.diff_tree_to_tree(Some(&old_tree), Some(&new_tree), Some(&mut opts))
            }
            (Some(base), None) => {
                let tree = self.resolve_tree(base)?;
                if request.cached {
                    repo.diff_tree_to_index(Some(&tree), None, Some(&mut opts))
                } else {
                    repo.diff_tree_to_workdir_with_index(Some(&tree), Some(&mut opts))
                }
            }
            (None, _) if request.cached => {
                let head_tree = self.head_tree()?;
                repo.diff_tree_to_index(head_tree.as_ref(), None, Some(&mut opts))
            }
            (None, _) => repo.diff_index_to_workdir(None, Some(&mut opts)),
        }
        .map_err(|e| convert_git2_error("diff", e))?;

        render_patch(&diff)
    }

    /// Most recent commits reachable from HEAD, newest first
    pub fn log(&self, max_count: usize) -> GitResult<Vec<CommitInfo>> {
        if self.repo.is_empty() {
            return Ok(Vec::new());
        }

        let repo = self.repo.inner();
        let mut revwalk = repo
            .revwalk()
            .map_err(|e| convert_git2_error("revwalk", e))?;
        revwalk
            .push_head()
            .map_err(|e| convert_git2_error("push_head", e))?;
        revwalk
            .set_sorting(Sort::TOPOLOGICAL | Sort::TIME)
            .map_err(|e| convert_git2_error("set_sorting", e))?;

        let mut commits = Vec::new();
        for oid in revwalk.take(max_count) {
            let oid = oid.map_err(|e| convert_git2_error("revwalk_next", e))?;
            let commit = repo
                .find_commit(oid)
                .map_err(|e| convert_git2_error("find_commit", e))?;
            commits.push(commit_info(&commit));
        }

        Ok(commits)
    }

    /// Header and patch for one commit, like `git show`
    pub fn show(&self, revision: Option<&str>, format: ShowFormat) -> GitResult<String> {
        let repo = self.repo.inner();
        let revision = revision.unwrap_or("HEAD");

        let commit = repo
            .revparse_single(revision)
            .and_then(|object| object.peel_to_commit())
            .map_err(|e| GitError::invalid_revision(revision, e))?;

        let mut output = render_commit_header(&commit, format);

        let new_tree = commit
            .tree()
            .map_err(|e| convert_git2_error("commit_tree", e))?;
        let old_tree = match commit.parent(0) {
            Ok(parent) => Some(
                parent
                    .tree()
                    .map_err(|e| convert_git2_error("parent_tree", e))?,
            ),
            Err(_) => None,
        };

        let diff = repo
            .diff_tree_to_tree(old_tree.as_ref(), Some(&new_tree), None)
            .map_err(|e| convert_git2_error("diff", e))?;
        let patch = render_patch(&diff)?;
        if !patch.is_empty() {
            output.push('\n');
            output.push_str(&patch);
        }

        Ok(output)
    }

    /// Paths recorded in the index, relative to the repository root with `/` separators
    pub fn tracked_files(&self) -> GitResult<BTreeSet<String>> {
        let index = self
            .repo
            .inner()
            .index()
            .map_err(|e| convert_git2_error("get_index", e))?;

        Ok(index
            .iter()
            .map(|entry| String::from_utf8_lossy(&entry.path).into_owned())
            .collect())
    }

    fn resolve_tree(&self, revision: &str) -> GitResult<Tree<'_>> {
        self.repo
            .inner()
            .revparse_single(revision)
            .and_then(|object| object.peel_to_tree())
            .map_err(|e| GitError::invalid_revision(revision, e))
    }

    fn head_tree(&self) -> GitResult<Option<Tree<'_>>> {
        if self.repo.is_empty() {
            return Ok(None);
        }
        let tree = self
            .repo
            .inner()
            .head()
            .and_then(|head| head.peel_to_tree())
            .map_err(|e| convert_git2_error("head_tree", e))?;
        Ok(Some(tree))
    }
}

fn commit_info(commit: &Commit<'_>) -> CommitInfo {
    let author = commit.author();
    let timestamp = chrono::DateTime::from_timestamp(author.when().seconds(), 0).unwrap_or_default();

    CommitInfo::new(
        commit.id().to_string(),
        commit.message().unwrap_or("").to_string(),
        author.name().unwrap_or("").to_string(),
        author.email().unwrap_or("").to_string(),
        timestamp,
    )
}

fn render_commit_header(commit: &Commit<'_>, format: ShowFormat) -> String {
    let info = commit_info(commit);
    let indented_message = info
        .message
        .trim_end()
        .lines()
        .map(|line| format!("    {line}"))
        .collect::<Vec<_>>()
        .join("\n");

    match format {
        ShowFormat::Oneline => format!("{} {}\n", info.hash, info.summary()),
        ShowFormat::Short => format!(
            "commit {}\nAuthor: {} <{}>\n\n    {}\n",
            info.hash,
            info.author,
            info.author_email,
            info.summary()
        ),
        ShowFormat::Medium => format!(
            "commit {}\nAuthor: {} <{}>\nDate:   {}\n\n{}\n",
            info.hash,
            info.author,
            info.author_email,
            info.timestamp.to_rfc2822(),
            indented_message
        ),
        ShowFormat::Full => {
            let committer = commit.committer();
            format!(
                "commit {}\nAuthor: {} <{}>\nCommit: {} <{}>\n\n{}\n",
                info.hash,
                info.author,
                info.author_email,
                committer.name().unwrap_or(""),
                committer.email().unwrap_or(""),
                indented_message
            )
        }
    }
}

fn render_patch(diff: &Diff<'_>) -> GitResult<String> {
    let mut output = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        if matches!(line.origin(), '+' | '-' | ' ') {
            output.push(line.origin());
        }
        output.push_str(&String::from_utf8_lossy(line.content()));
        true
    })
    .map_err(|e| convert_git2_error("print_diff", e))?;
    Ok(output)
}
