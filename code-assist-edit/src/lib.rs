//! File mutation engine for Code Assist
//!
//! Agents describe edits either with plain parameters or with a small XML
//! diff protocol. This crate parses that protocol, checks it against the
//! requested operation and path, applies it to the file content and reports
//! a unified diff of the result.
//!
//! ```no_run
//! use code_assist_edit::{FileEditor, PathResolver};
//!
//! # async fn example() -> code_assist_edit::EditResult<()> {
//! let resolver = PathResolver::new(["/home/user/project"])?;
//! let editor = FileEditor::new(resolver, ".mcp_server_code_assist_trash");
//!
//! editor
//!     .create_file("/home/user/project/hello.txt", Some("Hello world!"), None)
//!     .await?;
//!
//! let replacements = [("world".to_string(), "Rust".to_string())]
//!     .into_iter()
//!     .collect();
//! let diff = editor
//!     .modify_file("/home/user/project/hello.txt", Some(&replacements), None)
//!     .await?;
//! println!("{diff}");
//! # Ok(())
//! # }
//! ```

pub mod diff;
pub mod directive;
pub mod editor;
pub mod error;
pub mod mutator;
pub mod path;
pub mod validator;
pub mod writer;

pub use diff::unified_diff;
pub use directive::{Action, Change, Directive};
pub use editor::FileEditor;
pub use error::{EditError, EditResult};
pub use path::PathResolver;
pub use writer::TrashLocation;

// Re-exported so callers can build replacement maps without a direct dependency
pub use indexmap::IndexMap;
