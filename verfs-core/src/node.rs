//! Folder and file nodes.
//!
//! Nodes live in the arena owned by [`NamespaceTree`](crate::tree::NamespaceTree)
//! and refer to each other by [`NodeKey`]. A folder owns its children through
//! two indexes per kind: identifier -> child and name -> version chain. The
//! parent link of a folder is a plain key and is never followed when a
//! subtree is destroyed.

use crate::config::GroupAllocation;
use crate::error::{NamespaceError, Result};
use crate::identity::{extension_of, NodeId};
use crate::types::{FileMetadata, FolderMetadata, NodeKind};
use bytes::Bytes;
use indexmap::IndexMap;
use std::collections::BTreeMap;

/// Stable arena handle of a node. Keys are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeKey(pub(crate) u64);

/// Joins a folder path and a child name.
pub(crate) fn join_path(parent: &str, name: &str) -> String {
    if parent == "/" {
        format!("/{}", name)
    } else {
        format!("{}/{}", parent, name)
    }
}

/// Children of one kind inside a folder.
#[derive(Debug, Default)]
pub(crate) struct ChildIndex {
    /// Identifier -> child, ascending by identifier
    by_id: BTreeMap<NodeId, NodeKey>,
    /// Name -> identifiers in insertion order, names in first-seen order
    by_name: IndexMap<String, Vec<NodeId>>,
    /// Sibling groups opened over the folder's lifetime
    groups_opened: usize,
}

impl ChildIndex {
    /// Number of distinct names currently present.
    pub(crate) fn unique_names(&self) -> usize {
        self.by_name.len()
    }

    /// Number of children, every version counted.
    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }

    pub(crate) fn contains_name(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub(crate) fn get(&self, id: &NodeId) -> Option<NodeKey> {
        self.by_id.get(id).copied()
    }

    /// Earliest inserted identifier for `name`.
    pub(crate) fn first(&self, name: &str) -> Option<&NodeId> {
        self.by_name.get(name).and_then(|ids| ids.first())
    }

    /// Most recently inserted identifier for `name`.
    pub(crate) fn latest(&self, name: &str) -> Option<&NodeId> {
        self.by_name.get(name).and_then(|ids| ids.last())
    }

    /// Group number a name not yet present would open.
    pub(crate) fn fresh_group(&self, allocation: GroupAllocation) -> usize {
        match allocation {
            GroupAllocation::UniqueCount => self.unique_names() + 1,
            GroupAllocation::Monotonic => self.groups_opened + 1,
        }
    }

    /// Keys of every version of `name`, in insertion order.
    pub(crate) fn keys_named(&self, name: &str) -> Vec<NodeKey> {
        self.by_name
            .get(name)
            .map(|ids| ids.iter().filter_map(|id| self.get(id)).collect())
            .unwrap_or_default()
    }

    /// Children ascending by identifier.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&NodeId, NodeKey)> {
        self.by_id.iter().map(|(id, key)| (id, *key))
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.by_id.values().copied()
    }

    /// Registers a child under both indexes.
    pub(crate) fn insert(&mut self, id: NodeId, name: &str, key: NodeKey) -> Result<()> {
        if self.by_id.contains_key(&id) {
            return Err(NamespaceError::IdentityCollision { id: id.to_string() });
        }
        self.by_id.insert(id.clone(), key);
        let chain = self.by_name.entry(name.to_string()).or_default();
        if chain.is_empty() {
            self.groups_opened += 1;
        }
        chain.push(id);
        Ok(())
    }

    /// Unregisters every version of `name` and hands back their keys.
    pub(crate) fn remove_name(&mut self, name: &str) -> Vec<NodeKey> {
        let ids = self.by_name.shift_remove(name).unwrap_or_default();
        ids.iter().filter_map(|id| self.by_id.remove(id)).collect()
    }

    /// Moves the version chain of `from` under `to`. Identifiers are kept.
    pub(crate) fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        if self.by_name.contains_key(to) {
            return Err(NamespaceError::AlreadyExists { name: to.to_string() });
        }
        let ids = self
            .by_name
            .shift_remove(from)
            .ok_or_else(|| NamespaceError::not_found(NodeKind::File, from))?;
        self.by_name.insert(to.to_string(), ids);
        Ok(())
    }
}

/// A folder in the namespace.
#[derive(Debug)]
pub struct FolderNode {
    id: NodeId,
    name: String,
    path: String,
    parent: Option<NodeKey>,
    pub(crate) folders: ChildIndex,
    pub(crate) files: ChildIndex,
}

impl FolderNode {
    pub(crate) fn new(id: NodeId, name: String, path: String, parent: Option<NodeKey>) -> Self {
        Self {
            id,
            name,
            path,
            parent,
            folders: ChildIndex::default(),
            files: ChildIndex::default(),
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Back-reference to the parent folder; `None` for the root.
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// Two-digit version, `None` for the root.
    pub fn version(&self) -> Option<&str> {
        self.id.version()
    }

    pub fn unique_folder_count(&self) -> usize {
        self.folders.unique_names()
    }

    pub fn unique_file_count(&self) -> usize {
        self.files.unique_names()
    }

    /// Number of children of `kind`, every version counted.
    pub fn child_count(&self, kind: NodeKind) -> usize {
        self.index(kind).len()
    }

    pub fn has_child_named(&self, kind: NodeKind, name: &str) -> bool {
        self.index(kind).contains_name(name)
    }

    pub(crate) fn index(&self, kind: NodeKind) -> &ChildIndex {
        match kind {
            NodeKind::Folder => &self.folders,
            NodeKind::File => &self.files,
        }
    }

    pub(crate) fn index_mut(&mut self, kind: NodeKind) -> &mut ChildIndex {
        match kind {
            NodeKind::Folder => &mut self.folders,
            NodeKind::File => &mut self.files,
        }
    }

    /// Owned children of both kinds. The parent link is not included.
    pub(crate) fn owned_children(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.folders.keys().chain(self.files.keys())
    }

    pub fn metadata(&self) -> FolderMetadata {
        FolderMetadata {
            id: self.id.to_string(),
            name: self.name.clone(),
            path: self.path.clone(),
            unique_folder_count: self.unique_folder_count(),
            unique_file_count: self.unique_file_count(),
        }
    }
}

/// A file in the namespace.
#[derive(Debug)]
pub struct FileNode {
    id: NodeId,
    name: String,
    path: String,
    extension: String,
    content: Bytes,
}

impl FileNode {
    pub(crate) fn new(id: NodeId, name: String, path: String, content: Bytes) -> Self {
        let extension = extension_of(&name).to_string();
        Self {
            id,
            name,
            path,
            extension,
            content,
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn content(&self) -> &Bytes {
        &self.content
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }

    pub fn version(&self) -> &str {
        self.id.version().unwrap_or_default()
    }

    /// Replaces the content; size follows.
    pub fn set_content(&mut self, content: impl Into<Bytes>) {
        self.content = content.into();
    }

    /// Renames the file inside `parent_path`, refreshing extension and path.
    pub(crate) fn rename(&mut self, new_name: &str, parent_path: &str) {
        self.name = new_name.to_string();
        self.extension = extension_of(new_name).to_string();
        self.path = join_path(parent_path, new_name);
    }

    pub fn metadata(&self) -> FileMetadata {
        FileMetadata {
            id: self.id.to_string(),
            name: self.name.clone(),
            path: self.path.clone(),
            extension: self.extension.clone(),
            size: self.size(),
            version: self.version().to_string(),
        }
    }
}

/// Any node stored in the arena.
#[derive(Debug)]
pub enum Node {
    Folder(FolderNode),
    File(FileNode),
}

impl Node {
    pub fn id(&self) -> &NodeId {
        match self {
            Node::Folder(folder) => folder.id(),
            Node::File(file) => file.id(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::Folder(folder) => folder.name(),
            Node::File(file) => file.name(),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Node::Folder(folder) => folder.path(),
            Node::File(file) => file.path(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Folder(_) => NodeKind::Folder,
            Node::File(_) => NodeKind::File,
        }
    }

    pub fn as_folder(&self) -> Option<&FolderNode> {
        match self {
            Node::Folder(folder) => Some(folder),
            Node::File(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            Node::File(file) => Some(file),
            Node::Folder(_) => None,
        }
    }

    pub(crate) fn as_folder_mut(&mut self) -> Option<&mut FolderNode> {
        match self {
            Node::Folder(folder) => Some(folder),
            Node::File(_) => None,
        }
    }

    pub(crate) fn as_file_mut(&mut self) -> Option<&mut FileNode> {
        match self {
            Node::File(file) => Some(file),
            Node::Folder(_) => None,
        }
    }
}
