//! The namespace tree: sole owner of every node.

use crate::config::{GroupAllocation, NamespaceConfig};
use crate::error::{NamespaceError, Result};
use crate::identity::{derive_id, versioned_id, NodeId};
use crate::node::{join_path, FileNode, FolderNode, Node, NodeKey};
use crate::types::{FolderListing, FolderMetadata, ListingEntry, NodeKind};
use bytes::Bytes;
use std::collections::HashMap;
use tracing::debug;

/// Arena of nodes rooted at a single folder with identifier `"0"` and path `/`.
///
/// Dropping the tree drops every node exactly once; parent links are keys,
/// not owners.
#[derive(Debug)]
pub struct NamespaceTree {
    nodes: HashMap<NodeKey, Node>,
    root: NodeKey,
    next_key: u64,
    allocation: GroupAllocation,
}

impl NamespaceTree {
    /// Creates a tree holding only the root folder, with default configuration.
    pub fn new() -> Self {
        Self::with_config(&NamespaceConfig::default())
    }

    /// Creates a tree holding only the root folder.
    pub fn with_config(config: &NamespaceConfig) -> Self {
        let root = NodeKey(0);
        let folder = FolderNode::new(NodeId::root(), config.root_name.clone(), "/".to_string(), None);

        let mut nodes = HashMap::new();
        nodes.insert(root, Node::Folder(folder));

        Self {
            nodes,
            root,
            next_key: 1,
            allocation: config.group_allocation,
        }
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    pub fn allocation(&self) -> GroupAllocation {
        self.allocation
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is never removed.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(&key)
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(&key)
    }

    pub fn folder(&self, key: NodeKey) -> Option<&FolderNode> {
        self.nodes.get(&key).and_then(Node::as_folder)
    }

    pub fn file(&self, key: NodeKey) -> Option<&FileNode> {
        self.nodes.get(&key).and_then(Node::as_file)
    }

    pub(crate) fn file_mut(&mut self, key: NodeKey) -> Option<&mut FileNode> {
        self.nodes.get_mut(&key).and_then(Node::as_file_mut)
    }

    fn folder_mut(&mut self, key: NodeKey) -> Option<&mut FolderNode> {
        self.nodes.get_mut(&key).and_then(Node::as_folder_mut)
    }

    /// Looks up a folder the caller holds a key to.
    pub(crate) fn expect_folder(&self, key: NodeKey) -> Result<&FolderNode> {
        self.folder(key)
            .ok_or_else(|| stale_folder(key))
    }

    /// Identifier the next child `name` of `kind` under `parent` would receive.
    pub fn next_child_id(&self, parent: NodeKey, kind: NodeKind, name: &str) -> Result<NodeId> {
        let folder = self.expect_folder(parent)?;
        let index = folder.index(kind);
        derive_id(
            folder.id(),
            kind,
            index.latest(name),
            index.fresh_group(self.allocation),
        )
    }

    /// Key of the `version`-th (1-based) child named `name` of `kind`.
    pub fn find_version(
        &self,
        parent: NodeKey,
        kind: NodeKind,
        name: &str,
        version: u32,
    ) -> Result<NodeKey> {
        let index = self.expect_folder(parent)?.index(kind);
        let first = index
            .first(name)
            .ok_or_else(|| NamespaceError::not_found(kind, name))?;
        versioned_id(first, version)
            .and_then(|id| index.get(&id))
            .ok_or_else(|| NamespaceError::not_found(kind, &format!("{} (version {})", name, version)))
    }

    /// Creates a folder under `parent` and returns its key.
    pub fn create_folder(&mut self, parent: NodeKey, name: &str) -> Result<NodeKey> {
        let id = self.next_child_id(parent, NodeKind::Folder, name)?;
        let path = join_path(self.expect_folder(parent)?.path(), name);
        let node = Node::Folder(FolderNode::new(id, name.to_string(), path, Some(parent)));
        self.attach(parent, node)
    }

    /// Creates a file under `parent` and returns its key.
    pub fn create_file(&mut self, parent: NodeKey, name: &str, content: Bytes) -> Result<NodeKey> {
        let id = self.next_child_id(parent, NodeKind::File, name)?;
        let path = join_path(self.expect_folder(parent)?.path(), name);
        let node = Node::File(FileNode::new(id, name.to_string(), path, content));
        self.attach(parent, node)
    }

    /// Inserts `node` as a child of `parent`.
    ///
    /// Nothing is stored if the identifier is already taken.
    pub(crate) fn attach(&mut self, parent: NodeKey, node: Node) -> Result<NodeKey> {
        let key = NodeKey(self.next_key);
        let kind = node.kind();
        let id = node.id().clone();

        let folder = self
            .folder_mut(parent)
            .ok_or_else(|| stale_folder(parent))?;
        folder.index_mut(kind).insert(id.clone(), node.name(), key)?;

        debug!("Attached {} {} ({})", kind.as_str(), id, node.path());
        self.next_key += 1;
        self.nodes.insert(key, node);
        Ok(key)
    }

    /// Removes every version of `name` of `kind` under `parent`, together
    /// with their subtrees. Returns the number of nodes destroyed.
    pub fn detach_by_name(&mut self, parent: NodeKey, kind: NodeKind, name: &str) -> Result<usize> {
        let folder = self
            .folder_mut(parent)
            .ok_or_else(|| stale_folder(parent))?;
        if !folder.has_child_named(kind, name) {
            return Err(NamespaceError::not_found(kind, name));
        }

        let removed = folder.index_mut(kind).remove_name(name);
        let destroyed: usize = removed.into_iter().map(|key| self.destroy_subtree(key)).sum();
        debug!("Detached {} '{}': {} nodes destroyed", kind.as_str(), name, destroyed);
        Ok(destroyed)
    }

    /// Drops `key` and everything it owns. Only child indexes are followed.
    fn destroy_subtree(&mut self, key: NodeKey) -> usize {
        let mut stack = vec![key];
        let mut destroyed = 0;

        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                destroyed += 1;
                if let Node::Folder(folder) = node {
                    stack.extend(folder.owned_children());
                }
            }
        }

        destroyed
    }

    /// Renames every version of file `name` under `parent` to `new_name`.
    /// Identifiers are unchanged. Returns the number of files renamed.
    pub fn rename_file(&mut self, parent: NodeKey, name: &str, new_name: &str) -> Result<usize> {
        let folder = self
            .folder_mut(parent)
            .ok_or_else(|| stale_folder(parent))?;
        let parent_path = folder.path().to_string();
        let keys = folder.files.keys_named(name);
        folder.files.rename(name, new_name)?;

        for key in &keys {
            if let Some(file) = self.file_mut(*key) {
                file.rename(new_name, &parent_path);
            }
        }

        debug!("Renamed file '{}' to '{}' ({} versions)", name, new_name, keys.len());
        Ok(keys.len())
    }

    pub fn folder_metadata(&self, key: NodeKey) -> Result<FolderMetadata> {
        Ok(self.expect_folder(key)?.metadata())
    }

    /// Child folders then child files of `key`, each ascending by identifier.
    pub fn listing(&self, key: NodeKey) -> Result<FolderListing> {
        let folder = self.expect_folder(key)?;
        let entries = |kind: NodeKind| -> Vec<ListingEntry> {
            folder
                .index(kind)
                .iter()
                .filter_map(|(id, child)| {
                    self.get(child)
                        .map(|node| ListingEntry::new(id.to_string(), node.name().to_string(), kind))
                })
                .collect()
        };

        Ok(FolderListing {
            folders: entries(NodeKind::Folder),
            files: entries(NodeKind::File),
        })
    }
}

/// Error for a key that no longer names a live folder.
fn stale_folder(key: NodeKey) -> NamespaceError {
    NamespaceError::not_found(NodeKind::Folder, &format!("stale node key {}", key.0))
}

impl Default for NamespaceTree {
    fn default() -> Self {
        Self::new()
    }
}
