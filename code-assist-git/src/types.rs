//! Core types for Git operations

use crate::error::GitError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Information about a Git commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Commit hash (SHA-1)
    pub hash: String,
    /// Commit message
    pub message: String,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Commit timestamp
    pub timestamp: DateTime<Utc>,
    /// Short commit hash (first 8 characters)
    pub short_hash: String,
}

impl CommitInfo {
    /// Create a new CommitInfo
    pub fn new(
        hash: String,
        message: String,
        author: String,
        author_email: String,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let short_hash = hash.chars().take(8).collect();

        Self {
            hash,
            message,
            author,
            author_email,
            timestamp,
            short_hash,
        }
    }

    /// First line of the commit message
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Render as one `git_log` entry
    pub fn log_entry(&self) -> String {
        format!(
            "Commit: {}\nAuthor: {} <{}>\nDate: {}\nMessage: {}\n",
            self.hash,
            self.author,
            self.author_email,
            self.timestamp.to_rfc3339(),
            self.message.trim_end()
        )
    }
}

/// Detailed status summary for git repository state
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    /// Files that are staged and modified
    pub staged_modified: Vec<String>,
    /// Files that are unstaged and modified
    pub unstaged_modified: Vec<String>,
    /// Files that are untracked
    pub untracked: Vec<String>,
    /// Files that are staged for addition
    pub staged_new: Vec<String>,
    /// Files that are staged for deletion
    pub staged_deleted: Vec<String>,
    /// Files that are deleted but not staged
    pub unstaged_deleted: Vec<String>,
    /// Files that are renamed in the index
    pub renamed: Vec<String>,
    /// Files whose type changed in the index (file, symlink, submodule)
    pub staged_typechange: Vec<String>,
    /// Files renamed in the working tree but not staged
    pub unstaged_renamed: Vec<String>,
    /// Files whose type changed in the working tree
    pub unstaged_typechange: Vec<String>,
    /// Files that have conflicts
    pub conflicted: Vec<String>,
}

impl StatusSummary {
    /// Create a new empty status summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the working directory is clean
    pub fn is_clean(&self) -> bool {
        !self.has_staged_changes()
            && !self.has_unstaged_changes()
            && self.untracked.is_empty()
            && self.conflicted.is_empty()
    }

    /// Check if there are any staged changes
    pub fn has_staged_changes(&self) -> bool {
        !self.staged_modified.is_empty()
            || !self.staged_new.is_empty()
            || !self.staged_deleted.is_empty()
            || !self.renamed.is_empty()
            || !self.staged_typechange.is_empty()
    }

    /// Check if there are any unstaged changes
    pub fn has_unstaged_changes(&self) -> bool {
        !self.unstaged_modified.is_empty()
            || !self.unstaged_deleted.is_empty()
            || !self.unstaged_renamed.is_empty()
            || !self.unstaged_typechange.is_empty()
    }
}

impl fmt::Display for StatusSummary {
    /// Grouped the way `git status` groups them
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_clean() {
            return writeln!(f, "nothing to commit, working tree clean");
        }

        let mut sections: Vec<String> = Vec::new();

        if self.has_staged_changes() {
            let mut section = String::from("Changes to be committed:\n");
            push_entries(&mut section, "new file", &self.staged_new);
            push_entries(&mut section, "modified", &self.staged_modified);
            push_entries(&mut section, "deleted", &self.staged_deleted);
            push_entries(&mut section, "renamed", &self.renamed);
            push_entries(&mut section, "typechange", &self.staged_typechange);
            sections.push(section);
        }

        if self.has_unstaged_changes() {
            let mut section = String::from("Changes not staged for commit:\n");
            push_entries(&mut section, "modified", &self.unstaged_modified);
            push_entries(&mut section, "deleted", &self.unstaged_deleted);
            push_entries(&mut section, "renamed", &self.unstaged_renamed);
            push_entries(&mut section, "typechange", &self.unstaged_typechange);
            sections.push(section);
        }

        if !self.conflicted.is_empty() {
            let mut section = String::from("Unmerged paths:\n");
            push_entries(&mut section, "both modified", &self.conflicted);
            sections.push(section);
        }

        if !self.untracked.is_empty() {
            let mut section = String::from("Untracked files:\n");
            for path in &self.untracked {
                section.push_str(&format!("  {path}\n"));
            }
            sections.push(section);
        }

        write!(f, "{}", sections.join("\n"))
    }
}

fn push_entries(out: &mut String, label: &str, paths: &[String]) {
    for path in paths {
        out.push_str(&format!("  {:<12}{}\n", format!("{label}:"), path));
    }
}

/// Which two sides a `git_diff` request compares
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffRequest {
    /// Limit the diff to this file or directory (relative to the repository root)
    pub path: Option<String>,
    /// Compare against the index instead of the working tree
    pub cached: bool,
    /// Base revision
    pub commit: Option<String>,
    /// Second revision; with `commit`, compares the two trees
    pub compare_to: Option<String>,
}

/// Header layouts supported by `git_show`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ShowFormat {
    /// `<sha> <summary>`
    Oneline,
    /// commit, author and summary
    Short,
    /// commit, author, date and full message
    #[default]
    Medium,
    /// commit, author, committer and full message
    Full,
}

impl FromStr for ShowFormat {
    type Err = GitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "oneline" => Ok(Self::Oneline),
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "full" => Ok(Self::Full),
            _ => Err(GitError::InvalidShowFormat {
                format: s.to_string(),
            }),
        }
    }
}
