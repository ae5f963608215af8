//! Code Assist Git Operations
//!
//! Read-only inspection of a git repository through git2: working tree status,
//! patches between trees, the index and the working directory, commit history,
//! single-commit display and the set of tracked files.
//!
//! ```rust,no_run
//! use code_assist_git::{DiffRequest, GitOperations};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let git = GitOperations::with_work_dir("/path/to/repo")?;
//! println!("{}", git.status_report()?);
//! println!("{}", git.diff(&DiffRequest::default())?);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod operations;
pub mod repository;
pub mod types;

pub use error::{GitError, GitResult};
pub use operations::GitOperations;
pub use repository::GitRepository;
pub use types::{CommitInfo, DiffRequest, ShowFormat, StatusSummary};
