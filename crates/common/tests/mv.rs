//! Integration tests for directory and file renames
//!
//! The rename machinery has no atomic primitive underneath; these tests pin
//! the one guarantee that matters: a failed rename leaves data in two
//! places, never in none, and says so.

mod common;

use bytes::Bytes;

use ::common::workspace::WorkspaceError;

#[tokio::test]
async fn test_rename_dir_moves_every_key() {
    let workspace = common::setup_workspace().await;
    workspace.mkdir("olddir").await.unwrap();
    workspace
        .upload("olddir", "one.txt", Bytes::from("data1"), "text/plain")
        .await
        .unwrap();
    workspace
        .upload("olddir", "two.txt", Bytes::from("data2"), "text/plain")
        .await
        .unwrap();

    workspace.rename_dir("olddir", "newdir").await.unwrap();

    // exactly N new keys, zero old keys
    let keys = common::keys(&workspace.list_root().await.unwrap());
    assert_eq!(
        keys,
        vec![
            "users/testuser/".to_string(),
            "users/testuser/newdir/".to_string(),
            "users/testuser/newdir/one.txt".to_string(),
            "users/testuser/newdir/two.txt".to_string(),
        ]
    );

    // content travelled with the keys
    let bytes = workspace
        .store()
        .get("users/testuser/newdir/one.txt")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bytes, Bytes::from("data1"));
}

#[tokio::test]
async fn test_rename_dir_absent_is_not_found() {
    let workspace = common::setup_workspace().await;

    let result = workspace.rename_dir("ghost", "whatever").await;
    assert!(matches!(result, Err(WorkspaceError::DirectoryNotFound(_))));
}

#[tokio::test]
async fn test_rename_dir_onto_existing_sibling_merges() {
    let workspace = common::setup_workspace().await;
    workspace.mkdir("src").await.unwrap();
    workspace.mkdir("dst").await.unwrap();
    workspace
        .upload("src", "from-src.txt", Bytes::from("src"), "text/plain")
        .await
        .unwrap();
    workspace
        .upload("dst", "already-there.txt", Bytes::from("dst"), "text/plain")
        .await
        .unwrap();

    workspace.rename_dir("src", "dst").await.unwrap();

    // src is gone; dst holds both its own and the moved keys
    let keys = common::keys(&workspace.list_root().await.unwrap());
    assert_eq!(
        keys,
        vec![
            "users/testuser/".to_string(),
            "users/testuser/dst/".to_string(),
            "users/testuser/dst/already-there.txt".to_string(),
            "users/testuser/dst/from-src.txt".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_rename_dir_copy_failure_never_reaches_the_delete_phase() {
    let (workspace, flaky) = common::setup_flaky_workspace().await;
    workspace.mkdir("olddir").await.unwrap();
    workspace
        .upload("olddir", "a.txt", Bytes::from("a"), "text/plain")
        .await
        .unwrap();
    workspace
        .upload("olddir", "b.txt", Bytes::from("b"), "text/plain")
        .await
        .unwrap();

    // every copy into the new prefix fails
    flaky.fail_copies_to("newdir");

    let err = workspace.rename_dir("olddir", "newdir").await.unwrap_err();
    match err {
        WorkspaceError::CopyIncomplete { total, failed } => {
            assert_eq!(total, 3);
            assert_eq!(failed.len(), 3);
        }
        other => panic!("expected CopyIncomplete, got {other:?}"),
    }

    // no delete was ever issued; the old keys all survive
    assert!(flaky.deletes_issued().is_empty());
    let keys = common::keys(&workspace.ls("olddir").await.unwrap());
    assert_eq!(
        keys,
        vec![
            "users/testuser/olddir/".to_string(),
            "users/testuser/olddir/a.txt".to_string(),
            "users/testuser/olddir/b.txt".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_rename_dir_retry_completes_after_partial_copy() {
    let (workspace, flaky) = common::setup_flaky_workspace().await;
    workspace.mkdir("olddir").await.unwrap();
    workspace
        .upload("olddir", "a.txt", Bytes::from("a"), "text/plain")
        .await
        .unwrap();

    flaky.fail_copies_to("newdir/a.txt");
    workspace.rename_dir("olddir", "newdir").await.unwrap_err();

    // fault clears; the same rename re-run converges (copy is overwrite-safe)
    flaky.clear_faults();
    workspace.rename_dir("olddir", "newdir").await.unwrap();

    let keys = common::keys(&workspace.list_root().await.unwrap());
    assert_eq!(
        keys,
        vec![
            "users/testuser/".to_string(),
            "users/testuser/newdir/".to_string(),
            "users/testuser/newdir/a.txt".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_rename_file() {
    let workspace = common::setup_workspace().await;
    workspace.mkdir("docs").await.unwrap();
    workspace
        .upload("docs", "old.txt", Bytes::from("data"), "text/plain")
        .await
        .unwrap();

    workspace
        .rename_file("docs", "old.txt", "new.txt")
        .await
        .unwrap();

    let keys = common::keys(&workspace.ls("docs").await.unwrap());
    assert_eq!(
        keys,
        vec![
            "users/testuser/docs/".to_string(),
            "users/testuser/docs/new.txt".to_string(),
        ]
    );
    let bytes = workspace
        .store()
        .get("users/testuser/docs/new.txt")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bytes, Bytes::from("data"));
}

#[tokio::test]
async fn test_rename_file_missing_source_aborts_before_delete() {
    let workspace = common::setup_workspace().await;
    workspace.mkdir("docs").await.unwrap();

    let result = workspace.rename_file("docs", "ghost.txt", "new.txt").await;
    assert!(matches!(result, Err(WorkspaceError::Store(_))));

    let keys = common::keys(&workspace.ls("docs").await.unwrap());
    assert_eq!(keys, vec!["users/testuser/docs/".to_string()]);
}

#[tokio::test]
async fn test_rename_file_delete_failure_reports_the_duplicate() {
    let (workspace, flaky) = common::setup_flaky_workspace().await;
    workspace.mkdir("docs").await.unwrap();
    workspace
        .upload("docs", "old.txt", Bytes::from("data"), "text/plain")
        .await
        .unwrap();

    flaky.fail_deletes_of("old.txt");

    let err = workspace
        .rename_file("docs", "old.txt", "new.txt")
        .await
        .unwrap_err();
    match err {
        WorkspaceError::DeleteIncomplete { failed, .. } => {
            assert_eq!(failed.len(), 1);
            assert_eq!(failed[0].key, "users/testuser/docs/old.txt");
        }
        other => panic!("expected DeleteIncomplete, got {other:?}"),
    }

    // duplicate state, surfaced rather than hidden: both keys exist
    let keys = common::keys(&workspace.ls("docs").await.unwrap());
    assert!(keys.contains(&"users/testuser/docs/old.txt".to_string()));
    assert!(keys.contains(&"users/testuser/docs/new.txt".to_string()));
}
