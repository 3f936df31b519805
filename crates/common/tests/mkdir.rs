//! Integration tests for directory creation

mod common;

use ::common::workspace::WorkspaceError;

#[tokio::test]
async fn test_mkdir_writes_marker() {
    let workspace = common::setup_workspace().await;

    workspace.mkdir("docs").await.unwrap();

    let entries = workspace.list_root().await.unwrap();
    assert!(common::keys(&entries).contains(&"users/testuser/docs/".to_string()));
}

#[tokio::test]
async fn test_mkdir_marker_is_zero_bytes() {
    let workspace = common::setup_workspace().await;

    workspace.mkdir("docs").await.unwrap();

    let entries = workspace.ls("docs").await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].key, "users/testuser/docs/");
    assert_eq!(entries[0].size, 0);
}

#[tokio::test]
async fn test_mkdir_is_idempotent() {
    let workspace = common::setup_workspace().await;

    workspace.mkdir("docs").await.unwrap();
    workspace.mkdir("docs").await.unwrap();

    let markers = workspace
        .list_root()
        .await
        .unwrap()
        .into_iter()
        .filter(|e| e.key == "users/testuser/docs/")
        .count();
    assert_eq!(markers, 1);
}

#[tokio::test]
async fn test_concurrent_mkdir_same_name() {
    let workspace = common::setup_workspace().await;

    let (a, b) = tokio::join!(workspace.mkdir("shared"), workspace.mkdir("shared"));
    a.unwrap();
    b.unwrap();

    let markers = workspace
        .list_root()
        .await
        .unwrap()
        .into_iter()
        .filter(|e| e.key.starts_with("users/testuser/shared/"))
        .count();
    assert_eq!(markers, 1);
}

#[tokio::test]
async fn test_mkdir_rejects_invalid_names() {
    let workspace = common::setup_workspace().await;

    for name in ["", "a/b", "..", "."] {
        let result = workspace.mkdir(name).await;
        assert!(
            matches!(result, Err(WorkspaceError::Path(_))),
            "{name:?} should be rejected"
        );
    }

    // nothing was written
    let entries = workspace.list_root().await.unwrap();
    assert_eq!(common::keys(&entries), vec!["users/testuser/".to_string()]);
}
