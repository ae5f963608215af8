//! Git inspection tools against throwaway repositories

use code_assist_config::CodeAssistConfig;
use code_assist_tools::McpServer;
use git2::{Repository, Signature};
use rmcp::model::{CallToolResult, RawContent};
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn text(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        RawContent::Text(text) => &text.text,
        other => panic!("expected text content, got {other:?}"),
    }
}

fn commit(repo: &Repository, name: &str, content: &str, message: &str) {
    let work_dir = repo.workdir().unwrap();
    fs::write(work_dir.join(name), content).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(name)).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let signature = Signature::now("Ada", "ada@example.com").unwrap();
    let parent = repo.head().ok().and_then(|head| head.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .unwrap();
}

fn setup() -> (TempDir, Repository, McpServer) {
    let temp = TempDir::new().unwrap();
    let repo = Repository::init(temp.path()).unwrap();
    let config = CodeAssistConfig {
        allowed_roots: vec![temp.path().to_path_buf()],
        ..Default::default()
    };
    let server = McpServer::new(config).unwrap();
    (temp, repo, server)
}

#[tokio::test]
async fn test_edit_then_inspect_with_git_tools() {
    let (temp, repo, server) = setup();
    commit(&repo, "app.py", "print('hi')\n", "Add app");

    let path = temp.path().canonicalize().unwrap().join("app.py");
    let modified = server
        .execute_tool(
            "modify_file",
            json!({"path": path.to_string_lossy(), "replacements": {"hi": "hello"}}),
        )
        .await
        .unwrap();
    assert_eq!(modified.is_error, Some(false));

    let status = server.execute_tool("git_status", json!({})).await.unwrap();
    assert!(text(&status).contains("Changes not staged for commit:"));
    assert!(text(&status).contains("app.py"));

    let diff = server.execute_tool("git_diff", json!({})).await.unwrap();
    assert!(text(&diff).contains("-print('hi')"));
    assert!(text(&diff).contains("+print('hello')"));

    let log = server
        .execute_tool("git_log", json!({"max_count": 1}))
        .await
        .unwrap();
    assert!(text(&log).contains("Author: Ada <ada@example.com>"));
    assert!(text(&log).contains("Message: Add app"));

    let show = server
        .execute_tool("git_show", json!({"revision": "HEAD", "format": "short"}))
        .await
        .unwrap();
    assert!(text(&show).starts_with("commit "));
    assert!(text(&show).contains("+print('hi')"));
}

#[tokio::test]
async fn test_file_tree_skips_untracked_and_trash() {
    let (temp, repo, server) = setup();
    commit(&repo, "tracked.txt", "t", "Track");
    fs::write(temp.path().join("untracked.txt"), "u").unwrap();

    let deleted = temp.path().join("doomed.txt");
    fs::write(&deleted, "d").unwrap();
    server
        .execute_tool("delete_file", json!({"path": deleted.to_string_lossy()}))
        .await
        .unwrap();

    let tree = server
        .execute_tool("file_tree", json!({"path": temp.path().to_string_lossy()}))
        .await
        .unwrap();
    let output = text(&tree);

    assert!(output.contains("└── tracked.txt"));
    assert!(!output.contains("untracked.txt"));
    assert!(!output.contains(".mcp_server_code_assist_trash"));
    assert!(output.ends_with("Total: 0 directories, 1 files"));
}

#[tokio::test]
async fn test_root_nested_in_checkout_does_not_expose_enclosing_repository() {
    let temp = TempDir::new().unwrap();
    let repo = Repository::init(temp.path()).unwrap();
    commit(&repo, "secret.txt", "top secret\n", "Add secret");

    let nested_root = temp.path().join("service");
    fs::create_dir_all(&nested_root).unwrap();
    let server = McpServer::new(CodeAssistConfig {
        allowed_roots: vec![nested_root],
        ..Default::default()
    })
    .unwrap();

    for tool in ["git_status", "git_diff", "git_log", "git_show"] {
        let result = server.execute_tool(tool, json!({})).await.unwrap();
        assert_eq!(result.is_error, Some(true), "{tool} should be rejected");
        assert!(text(&result).contains("Path not allowed"), "{tool}");
        assert!(!text(&result).contains("top secret"), "{tool}");
    }
}
