//! Shared helpers for unit tests

use crate::mcp::tool_registry::ToolContext;
use code_assist_config::CodeAssistConfig;
use code_assist_edit::{FileEditor, PathResolver};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

/// Tool context whose only allowed root is a fresh temporary directory
pub fn create_test_context() -> (TempDir, ToolContext) {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let root = temp
        .path()
        .canonicalize()
        .expect("Failed to canonicalize temp dir");
    let context = create_context_for_root(&root);
    (temp, context)
}

/// Tool context whose only allowed root is `root`
pub fn create_context_for_root(root: &Path) -> ToolContext {
    let config = CodeAssistConfig {
        allowed_roots: vec![root.to_path_buf()],
        ..Default::default()
    };
    let resolver = PathResolver::new([root]).expect("Failed to build resolver");
    let editor = FileEditor::new(resolver, config.trash_dir_name.clone());

    ToolContext::new(Arc::new(editor), Arc::new(config))
}

/// Build an argument map from a JSON object literal
pub fn args(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// Text of the first content item of a tool result
pub fn result_text(result: &rmcp::model::CallToolResult) -> String {
    match &result.content[0].raw {
        rmcp::model::RawContent::Text(text) => text.text.clone(),
        other => panic!("expected text content, got {other:?}"),
    }
}

/// Write `name` under the repository work tree, stage it and commit on HEAD
pub fn commit_file(
    repo: &git2::Repository,
    name: &str,
    content: &str,
    message: &str,
) -> git2::Oid {
    let work_dir = repo.workdir().expect("repository has a work tree");
    let path = work_dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    std::fs::write(&path, content).expect("Failed to write file");

    let mut index = repo.index().expect("Failed to open index");
    index
        .add_path(std::path::Path::new(name))
        .expect("Failed to stage file");
    index.write().expect("Failed to write index");
    let tree_id = index.write_tree().expect("Failed to write tree");
    let tree = repo.find_tree(tree_id).expect("Failed to find tree");

    let signature =
        git2::Signature::now("Test User", "test@example.com").expect("Failed to build signature");
    let parents: Vec<git2::Commit> = repo
        .head()
        .ok()
        .and_then(|head| head.peel_to_commit().ok())
        .into_iter()
        .collect();
    let parent_refs: Vec<&git2::Commit> = parents.iter().collect();

    repo.commit(
        Some("HEAD"),
        &signature,
        &signature,
        message,
        &tree,
        &parent_refs,
    )
    .expect("Failed to commit")
}
