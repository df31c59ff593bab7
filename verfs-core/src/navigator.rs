//! Stateful cursor over a [`NamespaceTree`].
//!
//! The navigator tracks the current folder, resolves version-qualified names
//! and is the only way callers mutate the tree. Every operation returns its
//! outcome; a rejected operation is logged and leaves both the tree and the
//! cursor as they were.

use crate::error::{NamespaceError, Result};
use crate::identity::validate_name;
use crate::node::{FolderNode, NodeKey};
use crate::stats::{OperationStats, OperationType};
use crate::tree::NamespaceTree;
use crate::types::{FileMetadata, FolderListing, FolderMetadata, NodeKind};
use bytes::Bytes;
use tracing::{debug, warn};

/// Target that moves the cursor to the parent folder.
pub const PARENT_DIR: &str = "..";

/// Cursor over a borrowed namespace tree.
#[derive(Debug)]
pub struct Navigator<'t> {
    tree: &'t mut NamespaceTree,
    cwd: NodeKey,
    cwd_path: String,
    stats: OperationStats,
}

impl<'t> Navigator<'t> {
    /// Creates a navigator positioned at the root of `tree`.
    pub fn new(tree: &'t mut NamespaceTree) -> Self {
        let cwd = tree.root();
        Self {
            tree,
            cwd,
            cwd_path: "/".to_string(),
            stats: OperationStats::new(),
        }
    }

    pub fn tree(&self) -> &NamespaceTree {
        &*self.tree
    }

    /// Key of the current folder.
    pub fn current_key(&self) -> NodeKey {
        self.cwd
    }

    /// Path of the current folder.
    pub fn current_directory(&self) -> &str {
        &self.cwd_path
    }

    pub fn stats(&self) -> &OperationStats {
        &self.stats
    }

    fn current_folder(&self) -> &FolderNode {
        // Only children of the cursor are ever destroyed, so it stays live.
        self.tree
            .folder(self.cwd)
            .expect("navigator cursor points at a live folder")
    }

    /// Metadata of the current folder.
    pub fn folder_metadata(&self) -> FolderMetadata {
        self.current_folder().metadata()
    }

    /// Child folders then child files of the current folder, by identifier.
    pub fn folder_content(&self) -> FolderListing {
        self.tree.listing(self.cwd).unwrap_or_default()
    }

    /// Creates a folder in the current folder.
    ///
    /// A name already present gets the next version in its chain.
    pub fn create_folder(&mut self, name: &str) -> Result<NodeKey> {
        let outcome = validate_name(name).and_then(|()| self.tree.create_folder(self.cwd, name));
        self.record(OperationType::CreateFolder, name, outcome)
    }

    /// Creates a file in the current folder.
    ///
    /// A name already present gets the next version in its chain.
    pub fn create_file(&mut self, name: &str, content: impl Into<Bytes>) -> Result<NodeKey> {
        let content = content.into();
        let outcome =
            validate_name(name).and_then(|()| self.tree.create_file(self.cwd, name, content));
        self.record(OperationType::CreateFile, name, outcome)
    }

    /// Deletes every version of folder `name`, subtrees included.
    /// Returns the number of nodes destroyed.
    pub fn delete_folder(&mut self, name: &str) -> Result<usize> {
        let outcome = validate_name(name)
            .and_then(|()| self.tree.detach_by_name(self.cwd, NodeKind::Folder, name));
        self.record(OperationType::DeleteFolder, name, outcome)
    }

    /// Deletes every version of file `name`. Returns the number removed.
    pub fn delete_file(&mut self, name: &str) -> Result<usize> {
        let outcome = validate_name(name)
            .and_then(|()| self.tree.detach_by_name(self.cwd, NodeKind::File, name));
        self.record(OperationType::DeleteFile, name, outcome)
    }

    /// Moves the cursor.
    ///
    /// `".."` goes to the parent folder and ignores `version`. Any other
    /// target names a child folder of the current folder (`relative`) or of
    /// the root, and `version` picks its 1-based instance.
    pub fn change_directory(&mut self, target: &str, version: u32, relative: bool) -> Result<()> {
        let outcome = self.resolve_directory(target, version, relative);
        let key = self.record(OperationType::ChangeDirectory, target, outcome)?;

        self.cwd = key;
        self.cwd_path = self.current_folder().path().to_string();
        debug!("Changed directory to {}", self.cwd_path);
        Ok(())
    }

    fn resolve_directory(&self, target: &str, version: u32, relative: bool) -> Result<NodeKey> {
        if target == PARENT_DIR {
            return self
                .current_folder()
                .parent()
                .ok_or_else(|| NamespaceError::not_found(NodeKind::Folder, PARENT_DIR));
        }

        let start = if relative { self.cwd } else { self.tree.root() };
        self.tree.find_version(start, NodeKind::Folder, target, version)
    }

    /// Metadata of the `version`-th instance of file `name` in the current folder.
    pub fn file_metadata(&self, name: &str, version: u32) -> Result<FileMetadata> {
        let key = self.tree.find_version(self.cwd, NodeKind::File, name, version)?;
        self.tree
            .file(key)
            .map(|file| file.metadata())
            .ok_or_else(|| NamespaceError::not_found(NodeKind::File, name))
    }

    /// Content of the `version`-th instance of file `name` in the current folder.
    pub fn file_content(&self, name: &str, version: u32) -> Result<Bytes> {
        let key = self.tree.find_version(self.cwd, NodeKind::File, name, version)?;
        self.tree
            .file(key)
            .map(|file| file.content().clone())
            .ok_or_else(|| NamespaceError::not_found(NodeKind::File, name))
    }

    /// Replaces the content of the `version`-th instance of file `name`.
    pub fn write_file(&mut self, name: &str, version: u32, content: impl Into<Bytes>) -> Result<()> {
        let content = content.into();
        let outcome = self
            .tree
            .find_version(self.cwd, NodeKind::File, name, version)
            .and_then(|key| {
                let file = self
                    .tree
                    .file_mut(key)
                    .ok_or_else(|| NamespaceError::not_found(NodeKind::File, name))?;
                file.set_content(content);
                Ok(())
            });
        self.record(OperationType::WriteFile, name, outcome)
    }

    /// Renames every version of file `name` to `new_name`, keeping identifiers.
    pub fn rename_file(&mut self, name: &str, new_name: &str) -> Result<usize> {
        let outcome = validate_name(name)
            .and_then(|()| validate_name(new_name))
            .and_then(|()| self.tree.rename_file(self.cwd, name, new_name));
        self.record(OperationType::RenameFile, name, outcome)
    }

    fn record<T>(&mut self, op: OperationType, target: &str, outcome: Result<T>) -> Result<T> {
        match &outcome {
            Ok(_) => self.stats.record_success(op),
            Err(err) => {
                warn!("{} '{}' in {} rejected: {}", op.name(), target, self.cwd_path, err);
                self.stats.record_failure(op);
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_root() {
        let mut tree = NamespaceTree::new();
        let nav = Navigator::new(&mut tree);
        assert_eq!(nav.current_directory(), "/");
        assert_eq!(nav.current_key(), nav.tree().root());
        assert_eq!(nav.folder_metadata().name, "root");
        assert!(nav.folder_content().is_empty());
    }

    #[test]
    fn test_parent_of_root_is_rejected() {
        let mut tree = NamespaceTree::new();
        let mut nav = Navigator::new(&mut tree);

        let err = nav.change_directory(PARENT_DIR, 1, true).unwrap_err();
        assert!(matches!(err, NamespaceError::NotFound { kind: NodeKind::Folder, .. }));
        assert_eq!(nav.current_directory(), "/");
        assert_eq!(nav.stats().get(OperationType::ChangeDirectory).failed, 1);
    }

    #[test]
    fn test_absolute_change_directory() {
        let mut tree = NamespaceTree::new();
        let mut nav = Navigator::new(&mut tree);
        nav.create_folder("top").unwrap();
        nav.change_directory("top", 1, true).unwrap();
        nav.create_folder("inner").unwrap();

        // "top" is not a child of /top, but it is a child of the root.
        assert!(nav.change_directory("top", 1, true).is_err());
        nav.change_directory("top", 1, false).unwrap();
        assert_eq!(nav.current_directory(), "/top");

        nav.change_directory("inner", 1, true).unwrap();
        assert_eq!(nav.current_directory(), "/top/inner");
        assert!(nav.change_directory("inner", 1, false).is_err());
        assert_eq!(nav.current_directory(), "/top/inner");
    }

    #[test]
    fn test_delete_checks_kind() {
        let mut tree = NamespaceTree::new();
        let mut nav = Navigator::new(&mut tree);
        nav.create_folder("shared").unwrap();

        let err = nav.delete_file("shared").unwrap_err();
        assert!(matches!(err, NamespaceError::NotFound { kind: NodeKind::File, .. }));
        assert_eq!(nav.folder_metadata().unique_folder_count, 1);

        assert_eq!(nav.delete_folder("shared").unwrap(), 1);
        assert_eq!(nav.folder_metadata().unique_folder_count, 0);
    }

    #[test]
    fn test_delete_validates_name() {
        let mut tree = NamespaceTree::new();
        let mut nav = Navigator::new(&mut tree);
        assert!(matches!(nav.delete_folder("9lives"), Err(NamespaceError::InvalidName { .. })));
        assert!(matches!(nav.delete_file("a/b"), Err(NamespaceError::InvalidName { .. })));
    }

    #[test]
    fn test_file_queries_and_write() {
        let mut tree = NamespaceTree::new();
        let mut nav = Navigator::new(&mut tree);
        nav.create_file("notes.md", "first").unwrap();
        nav.create_file("notes.md", "second draft").unwrap();

        let meta = nav.file_metadata("notes.md", 2).unwrap();
        assert_eq!(meta.id, "00101");
        assert_eq!(meta.version, "01");
        assert_eq!(meta.size, 12);
        assert_eq!(meta.extension, "md");
        assert_eq!(meta.path, "/notes.md");

        assert_eq!(nav.file_content("notes.md", 1).unwrap(), Bytes::from_static(b"first"));

        nav.write_file("notes.md", 1, "rewritten").unwrap();
        assert_eq!(nav.file_metadata("notes.md", 1).unwrap().size, 9);
        assert_eq!(nav.file_content("notes.md", 2).unwrap(), Bytes::from_static(b"second draft"));

        assert!(nav.write_file("notes.md", 3, "x").is_err());
        assert!(nav.file_metadata("missing", 1).is_err());
        assert_eq!(nav.stats().get(OperationType::WriteFile).succeeded, 1);
        assert_eq!(nav.stats().get(OperationType::WriteFile).failed, 1);
    }

    #[test]
    fn test_rename_file() {
        let mut tree = NamespaceTree::new();
        let mut nav = Navigator::new(&mut tree);
        nav.create_file("draft.txt", "a").unwrap();
        nav.create_file("draft.txt", "b").unwrap();
        nav.create_file("other", "c").unwrap();

        assert!(matches!(
            nav.rename_file("draft.txt", "other"),
            Err(NamespaceError::AlreadyExists { .. })
        ));
        assert!(matches!(
            nav.rename_file("draft.txt", "2nd"),
            Err(NamespaceError::InvalidName { .. })
        ));

        assert_eq!(nav.rename_file("draft.txt", "final.csv").unwrap(), 2);
        let meta = nav.file_metadata("final.csv", 2).unwrap();
        assert_eq!(meta.id, "00101");
        assert_eq!(meta.extension, "csv");
        assert_eq!(meta.path, "/final.csv");
        assert_eq!(nav.folder_metadata().unique_file_count, 2);

        // The renamed chain keeps growing from its latest version.
        let key = nav.create_file("final.csv", "c").unwrap();
        assert_eq!(nav.tree().file(key).unwrap().id().as_str(), "00102");
    }

    #[test]
    fn test_stats_track_outcomes() {
        let mut tree = NamespaceTree::new();
        let mut nav = Navigator::new(&mut tree);
        nav.create_folder("a").unwrap();
        let _ = nav.create_folder("1a");
        let _ = nav.delete_file("a");

        let stats = nav.stats();
        assert_eq!(stats.get(OperationType::CreateFolder).succeeded, 1);
        assert_eq!(stats.get(OperationType::CreateFolder).failed, 1);
        assert_eq!(stats.get(OperationType::DeleteFile).failed, 1);
    }
}
