//! Integration tests for the versioned namespace
//!
//! These tests drive the namespace only through the navigator and cover:
//! - Distinct-name counting and version chains
//! - Version-qualified navigation
//! - Deletion of whole version chains
//! - Name validation and overflow boundaries
//! - Sibling group numbering after deletions

use verfs_core::{
    GroupAllocation, NamespaceConfig, NamespaceError, NamespaceTree, Navigator, NodeKind,
};

fn file_id(nav: &Navigator<'_>, key: verfs_core::NodeKey) -> String {
    nav.tree().file(key).unwrap().id().to_string()
}

fn folder_id(nav: &Navigator<'_>, key: verfs_core::NodeKey) -> String {
    nav.tree().folder(key).unwrap().id().to_string()
}

#[test]
fn test_same_name_counts_once() {
    let mut tree = NamespaceTree::new();
    let mut nav = Navigator::new(&mut tree);

    for _ in 0..5 {
        nav.create_file("a", "x").unwrap();
    }
    assert_eq!(nav.folder_metadata().unique_file_count, 1);
    assert_eq!(nav.folder_content().files.len(), 5);
}

#[test]
fn test_distinct_names_count_each() {
    let mut tree = NamespaceTree::new();
    let mut nav = Navigator::new(&mut tree);

    for i in 0..7 {
        nav.create_file(&format!("file{}", i), "x").unwrap();
    }
    assert_eq!(nav.folder_metadata().unique_file_count, 7);
}

#[test]
fn test_version_chain() {
    let mut tree = NamespaceTree::new();
    let mut nav = Navigator::new(&mut tree);
    nav.create_folder("sub").unwrap();
    nav.change_directory("sub", 1, true).unwrap();

    let ids: Vec<String> = (0..3)
        .map(|_| {
            let key = nav.create_file("a", "x").unwrap();
            file_id(&nav, key)
        })
        .collect();

    assert_eq!(ids, vec!["001000100", "001000101", "001000102"]);
    for id in &ids {
        assert!(id.starts_with("00100"));
        assert_eq!(&id[5..7], "01");
    }
}

#[test]
fn test_navigation_round_trip() {
    let mut tree = NamespaceTree::new();
    let mut nav = Navigator::new(&mut tree);
    let before = nav.folder_metadata();

    let x = nav.create_folder("x").unwrap();
    nav.change_directory("x", 1, true).unwrap();
    assert_eq!(nav.current_key(), x);
    assert_eq!(nav.folder_metadata().id, "00100");
    assert_eq!(nav.current_directory(), "/x");

    nav.change_directory("..", 42, true).unwrap();
    let after = nav.folder_metadata();
    assert_eq!(after.id, before.id);
    assert_eq!(after.path, before.path);
    assert_eq!(nav.current_directory(), "/");
}

#[test]
fn test_version_selection() {
    let mut tree = NamespaceTree::new();
    let mut nav = Navigator::new(&mut tree);
    let v1 = nav.create_folder("b").unwrap();
    let v2 = nav.create_folder("b").unwrap();
    assert_eq!(folder_id(&nav, v1), "00100");
    assert_eq!(folder_id(&nav, v2), "00101");

    nav.change_directory("b", 2, true).unwrap();
    assert_eq!(nav.current_key(), v2);
    assert_eq!(nav.folder_metadata().id, "00101");
}

#[test]
fn test_missing_version_leaves_cursor() {
    let mut tree = NamespaceTree::new();
    let mut nav = Navigator::new(&mut tree);
    nav.create_folder("b").unwrap();
    nav.create_folder("b").unwrap();

    let err = nav.change_directory("b", 5, true).unwrap_err();
    assert!(matches!(err, NamespaceError::NotFound { kind: NodeKind::Folder, .. }));
    assert!(nav.change_directory("b", 0, true).is_err());
    assert!(nav.change_directory("nope", 1, true).is_err());
    assert_eq!(nav.current_directory(), "/");
}

#[test]
fn test_delete_removes_all_versions() {
    let mut tree = NamespaceTree::new();
    let mut nav = Navigator::new(&mut tree);
    nav.create_file("a", "1").unwrap();
    nav.create_file("a", "2").unwrap();
    nav.create_file("keep", "3").unwrap();
    assert_eq!(nav.folder_metadata().unique_file_count, 2);

    assert_eq!(nav.delete_file("a").unwrap(), 2);
    assert_eq!(nav.folder_metadata().unique_file_count, 1);
    assert_eq!(nav.folder_content().ids(NodeKind::File), vec!["00200"]);

    let err = nav.delete_file("a").unwrap_err();
    assert!(matches!(err, NamespaceError::NotFound { kind: NodeKind::File, .. }));
    assert_eq!(nav.folder_metadata().unique_file_count, 1);
}

#[test]
fn test_delete_folder_destroys_subtree() {
    let mut tree = NamespaceTree::new();
    let mut nav = Navigator::new(&mut tree);
    nav.create_folder("outer").unwrap();
    nav.change_directory("outer", 1, true).unwrap();
    nav.create_folder("inner").unwrap();
    nav.change_directory("inner", 1, true).unwrap();
    nav.create_file("deep.txt", "x").unwrap();
    nav.change_directory("outer", 1, false).unwrap();
    nav.change_directory("..", 1, true).unwrap();

    assert_eq!(nav.delete_folder("outer").unwrap(), 3);
    assert_eq!(nav.tree().len(), 1);
    assert!(nav.folder_content().is_empty());
}

#[test]
fn test_invalid_names_rejected_without_mutation() {
    let mut tree = NamespaceTree::new();
    let mut nav = Navigator::new(&mut tree);

    for bad in ["1abc", "a/b", ""] {
        let err = nav.create_folder(bad).unwrap_err();
        assert!(matches!(err, NamespaceError::InvalidName { .. }), "{bad:?}");
        let err = nav.create_file(bad, "x").unwrap_err();
        assert!(matches!(err, NamespaceError::InvalidName { .. }), "{bad:?}");
    }

    let meta = nav.folder_metadata();
    assert_eq!(meta.unique_folder_count, 0);
    assert_eq!(meta.unique_file_count, 0);
    assert_eq!(nav.tree().len(), 1);
}

#[test]
fn test_extension_derivation() {
    let mut tree = NamespaceTree::new();
    let mut nav = Navigator::new(&mut tree);
    nav.create_file("report.tar.gz", "...").unwrap();
    nav.create_file("README", "...").unwrap();

    assert_eq!(nav.file_metadata("report.tar.gz", 1).unwrap().extension, "gz");
    assert_eq!(nav.file_metadata("README", 1).unwrap().extension, "");
}

#[test]
fn test_hundredth_distinct_name_overflows() {
    let mut tree = NamespaceTree::new();
    let mut nav = Navigator::new(&mut tree);

    for i in 1..=99 {
        nav.create_folder(&format!("n{}", i)).unwrap();
    }
    let err = nav.create_folder("n100").unwrap_err();
    assert!(matches!(err, NamespaceError::TooManySiblingNames { kind: NodeKind::Folder, .. }));
    assert_eq!(nav.folder_metadata().unique_folder_count, 99);

    // Files are numbered independently of folders.
    nav.create_file("n100", "x").unwrap();
}

#[test]
fn test_hundredth_version_overflows() {
    let mut tree = NamespaceTree::new();
    let mut nav = Navigator::new(&mut tree);

    let mut last = None;
    for _ in 0..99 {
        last = Some(nav.create_file("a", "x").unwrap());
    }
    assert_eq!(file_id(&nav, last.unwrap()), "00198");

    let err = nav.create_file("a", "x").unwrap_err();
    assert!(matches!(err, NamespaceError::VersionOverflow { .. }));
    assert_eq!(nav.folder_content().files.len(), 99);
    assert_eq!(nav.file_metadata("a", 99).unwrap().version, "98");
}

#[test]
fn test_unique_count_allocation_can_collide_after_delete() {
    let mut tree = NamespaceTree::new();
    let mut nav = Navigator::new(&mut tree);
    nav.create_file("a", "x").unwrap();
    nav.create_file("b", "x").unwrap();
    nav.delete_file("a").unwrap();

    // One distinct name is left, so "c" is numbered 02 like the live "b".
    let err = nav.create_file("c", "x").unwrap_err();
    assert!(matches!(err, NamespaceError::IdentityCollision { ref id } if id == "00200"));
    assert_eq!(nav.folder_metadata().unique_file_count, 1);
    assert_eq!(nav.tree().len(), 2);
}

#[test]
fn test_unique_count_allocation_reuses_freed_group() {
    let mut tree = NamespaceTree::new();
    let mut nav = Navigator::new(&mut tree);
    nav.create_file("a", "x").unwrap();
    nav.create_file("b", "x").unwrap();
    nav.delete_file("b").unwrap();

    let key = nav.create_file("c", "x").unwrap();
    assert_eq!(file_id(&nav, key), "00200");
}

#[test]
fn test_monotonic_allocation_never_recycles() {
    let config = NamespaceConfig {
        group_allocation: GroupAllocation::Monotonic,
        ..NamespaceConfig::default()
    };
    let mut tree = NamespaceTree::with_config(&config);
    let mut nav = Navigator::new(&mut tree);
    nav.create_file("a", "x").unwrap();
    nav.create_file("b", "x").unwrap();
    nav.delete_file("a").unwrap();

    let key = nav.create_file("c", "x").unwrap();
    assert_eq!(file_id(&nav, key), "00300");
    assert_eq!(nav.folder_metadata().unique_file_count, 2);
}

#[test]
fn test_monotonic_group_ceiling_survives_deletes() {
    let config = NamespaceConfig {
        group_allocation: GroupAllocation::Monotonic,
        ..NamespaceConfig::default()
    };
    let mut tree = NamespaceTree::with_config(&config);
    let mut nav = Navigator::new(&mut tree);

    for i in 1..=99 {
        let name = format!("n{}", i);
        nav.create_file(&name, "x").unwrap();
        nav.delete_file(&name).unwrap();
    }
    assert_eq!(nav.folder_metadata().unique_file_count, 0);

    let err = nav.create_file("fresh", "x").unwrap_err();
    assert!(matches!(err, NamespaceError::TooManySiblingNames { kind: NodeKind::File, .. }));
    assert_eq!(nav.folder_metadata().unique_file_count, 0);
    assert_eq!(nav.tree().len(), 1);

    // Folders keep their own counter.
    nav.create_folder("fresh").unwrap();
}

#[test]
fn test_listing_orders_folders_then_files() {
    let mut tree = NamespaceTree::new();
    let mut nav = Navigator::new(&mut tree);
    nav.create_file("f", "x").unwrap();
    nav.create_folder("b").unwrap();
    nav.create_folder("a").unwrap();
    nav.create_folder("b").unwrap();

    let listing = nav.folder_content();
    let rendered: Vec<(String, String)> = listing
        .iter()
        .map(|e| (e.id.clone(), e.name.clone()))
        .collect();
    assert_eq!(
        rendered,
        vec![
            ("00100".to_string(), "b".to_string()),
            ("00101".to_string(), "b".to_string()),
            ("00200".to_string(), "a".to_string()),
            ("00100".to_string(), "f".to_string()),
        ]
    );
}

#[test]
fn test_demo_session() {
    let mut tree = NamespaceTree::new();
    let mut nav = Navigator::new(&mut tree);

    nav.create_folder("aaa").unwrap();
    nav.create_file("aaa", "bbb").unwrap();
    nav.create_folder("bbb").unwrap();
    nav.create_file("aaa", "fffffffff").unwrap();

    nav.change_directory("aaa", 1, true).unwrap();
    assert_eq!(nav.current_directory(), "/aaa");
    nav.change_directory("..", 1, true).unwrap();
    let root = nav.folder_metadata();
    assert_eq!((root.unique_folder_count, root.unique_file_count), (2, 1));

    nav.create_folder("aaa").unwrap();
    nav.delete_file("aaa").unwrap();
    assert_eq!(nav.folder_metadata().unique_file_count, 0);

    nav.change_directory("aaa", 2, true).unwrap();
    nav.create_file("aaa", "bbb").unwrap();
    nav.create_folder("bbb").unwrap();
    nav.create_file("aaa", "fffffffff").unwrap();
    let second = nav.folder_content();
    assert_eq!(second.ids(NodeKind::Folder), vec!["001010100"]);
    assert_eq!(second.ids(NodeKind::File), vec!["001010100", "001010101"]);

    nav.change_directory("..", 1, true).unwrap();
    nav.change_directory("aaa", 1, true).unwrap();
    let first = nav.folder_metadata();
    assert_eq!((first.unique_folder_count, first.unique_file_count), (0, 0));

    nav.change_directory("..", 1, true).unwrap();
    nav.change_directory("aaa", 2, true).unwrap();
    let second = nav.folder_metadata();
    assert_eq!(second.path, "/aaa");
    assert_eq!((second.unique_folder_count, second.unique_file_count), (1, 1));
}
