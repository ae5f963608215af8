//! Directory tree tool
//!
//! The listing source depends on where the directory lives: the git index when
//! it is inside a repository, otherwise a `.gitignore`-aware walk.

use crate::mcp::error_handling::McpErrorHandler;
use crate::mcp::tool_registry::{BaseToolImpl, McpTool, ToolContext};
use async_trait::async_trait;
use code_assist_git::GitOperations;
use ignore::WalkBuilder;
use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Component, Path};
use tracing::debug;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

#[derive(Debug, Deserialize)]
struct FileTreeRequest {
    path: String,
}

/// Tool for rendering a directory tree
#[derive(Default)]
pub struct FileTreeTool;

impl FileTreeTool {
    /// Creates a new instance of the FileTreeTool
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl McpTool for FileTreeTool {
    fn name(&self) -> &'static str {
        "file_tree"
    }

    fn description(&self) -> &'static str {
        include_str!("description.md")
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Directory to show"
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(
        &self,
        arguments: serde_json::Map<String, serde_json::Value>,
        context: &ToolContext,
    ) -> std::result::Result<CallToolResult, McpError> {
        let request: FileTreeRequest = BaseToolImpl::parse_arguments(arguments)?;

        let result = context.resolve_directory(&request.path).map(|target| {
            let tree = tracked_tree(&target)
                .unwrap_or_else(|| walked_tree(&target, context.editor.trash_dir_name()));
            tree.render(&target.display().to_string())
        });

        Ok(McpErrorHandler::into_result(result, self.name()))
    }
}

#[derive(Debug, Default)]
struct TreeNode {
    is_dir: bool,
    children: BTreeMap<String, TreeNode>,
}

impl TreeNode {
    /// Add `relative` and any missing ancestors; ancestors are always directories
    fn insert(&mut self, relative: &Path, is_dir: bool) {
        let names: Vec<String> = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        let last = names.len().saturating_sub(1);
        let mut node = self;
        for (depth, name) in names.into_iter().enumerate() {
            node = node.children.entry(name).or_default();
            if depth < last || is_dir {
                node.is_dir = true;
            }
        }
    }

    fn render(&self, title: &str) -> String {
        let mut output = format!("{title}\n");
        let mut directories = 0;
        let mut files = 0;
        self.render_children("", &mut output, &mut directories, &mut files);
        output.push_str(&format!("\nTotal: {directories} directories, {files} files"));
        output
    }

    fn render_children(
        &self,
        prefix: &str,
        output: &mut String,
        directories: &mut usize,
        files: &mut usize,
    ) {
        let mut entries: Vec<(&String, &TreeNode)> = self.children.iter().collect();
        entries.sort_by(|(a_name, a), (b_name, b)| {
            b.is_dir.cmp(&a.is_dir).then_with(|| a_name.cmp(b_name))
        });

        let count = entries.len();
        for (index, (name, child)) in entries.into_iter().enumerate() {
            let is_last = index + 1 == count;
            let connector = if is_last { LAST_BRANCH } else { BRANCH };
            output.push_str(&format!("{prefix}{connector}{name}\n"));

            if child.is_dir {
                *directories += 1;
                let child_prefix = format!("{prefix}{}", if is_last { SPACE } else { PIPE });
                child.render_children(&child_prefix, output, directories, files);
            } else {
                *files += 1;
            }
        }
    }
}

/// Tree of the tracked files under `target`, or `None` outside a repository
fn tracked_tree(target: &Path) -> Option<TreeNode> {
    let git = GitOperations::with_work_dir(target).ok()?;
    let work_dir = git.repository().path().canonicalize().ok()?;
    let prefix = target
        .strip_prefix(&work_dir)
        .ok()?
        .components()
        .filter_map(|component| match component {
            Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");

    let tracked = match git.tracked_files() {
        Ok(tracked) => tracked,
        Err(e) => {
            debug!("Falling back to directory walk: {e}");
            return None;
        }
    };

    let mut root = TreeNode {
        is_dir: true,
        ..Default::default()
    };
    for file in tracked {
        let relative = if prefix.is_empty() {
            file.as_str()
        } else {
            match file
                .strip_prefix(prefix.as_str())
                .and_then(|rest| rest.strip_prefix('/'))
            {
                Some(rest) => rest,
                None => continue,
            }
        };
        if work_dir.join(&file).is_file() {
            root.insert(Path::new(relative), false);
        }
    }

    debug!(
        work_dir = %work_dir.display(),
        prefix = %prefix,
        "Built tree from tracked files"
    );
    Some(root)
}

/// Tree of everything under `target` not excluded by `.gitignore` rules
fn walked_tree(target: &Path, trash_dir_name: &str) -> TreeNode {
    let mut root = TreeNode {
        is_dir: true,
        ..Default::default()
    };

    let skip = [".git".to_string(), trash_dir_name.to_string()];
    let walker = WalkBuilder::new(target)
        .hidden(false)
        .git_ignore(true)
        .require_git(false)
        .filter_entry(move |entry| {
            let name = entry.file_name().to_string_lossy();
            !skip.iter().any(|skipped| *skipped == name)
        })
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                debug!("Skipping unreadable entry: {e}");
                continue;
            }
        };
        if entry.depth() == 0 {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(target) else {
            continue;
        };
        let is_dir = entry.file_type().is_some_and(|kind| kind.is_dir());
        root.insert(relative, is_dir);
    }

    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{args, create_test_context, result_text};
    use std::fs;

    #[test]
    fn test_render_orders_directories_first() {
        let mut root = TreeNode::default();
        root.insert(Path::new("b.txt"), false);
        root.insert(Path::new("src/main.rs"), false);
        root.insert(Path::new("src/lib.rs"), false);
        root.insert(Path::new("a.txt"), false);
        root.insert(Path::new("empty"), true);

        let expected = "\
/project
├── empty
├── src
│   ├── lib.rs
│   └── main.rs
├── a.txt
└── b.txt

Total: 2 directories, 4 files";
        assert_eq!(root.render("/project"), expected);
    }

    #[tokio::test]
    async fn test_walk_honors_gitignore() {
        let (temp, context) = create_test_context();
        let root = temp.path();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::create_dir_all(root.join("target/debug")).unwrap();
        fs::write(root.join("src/main.rs"), "fn main() {}").unwrap();
        fs::write(root.join("target/debug/app"), "bin").unwrap();
        fs::write(root.join(".gitignore"), "target/\n").unwrap();

        let result = FileTreeTool::new()
            .execute(args(serde_json::json!({"path": "."})), &context)
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(false));
        let text = result_text(&result);
        assert!(text.contains("├── src\n│   └── main.rs\n└── .gitignore\n"));
        assert!(!text.contains("target"));
        assert!(text.ends_with("Total: 1 directories, 2 files"));
    }

    #[tokio::test]
    async fn test_repository_shows_only_tracked_files() {
        let (temp, context) = create_test_context();
        let root = temp.path();
        let repo = git2::Repository::init(root).unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/lib.rs"), "").unwrap();
        fs::write(root.join("README.md"), "").unwrap();
        fs::write(root.join("scratch.txt"), "").unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new("src/lib.rs")).unwrap();
        index.add_path(Path::new("README.md")).unwrap();
        index.write().unwrap();

        let result = FileTreeTool::new()
            .execute(args(serde_json::json!({"path": "."})), &context)
            .await
            .unwrap();
        let text = result_text(&result);
        assert!(text.contains("├── src\n│   └── lib.rs\n└── README.md\n"));
        assert!(!text.contains("scratch.txt"));

        let result = FileTreeTool::new()
            .execute(args(serde_json::json!({"path": "src"})), &context)
            .await
            .unwrap();
        let text = result_text(&result);
        assert!(text.contains("└── lib.rs\n"));
        assert!(text.ends_with("Total: 0 directories, 1 files"));
    }

    #[tokio::test]
    async fn test_file_path_is_rejected() {
        let (temp, context) = create_test_context();
        fs::write(temp.path().join("a.txt"), "").unwrap();

        let result = FileTreeTool::new()
            .execute(args(serde_json::json!({"path": "a.txt"})), &context)
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
    }
}
