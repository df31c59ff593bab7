use crate::types::NodeKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One child in a folder listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    /// Composite identifier of the child
    pub id: String,
    /// Name of the child
    pub name: String,
    /// Whether the child is a folder or a file
    pub kind: NodeKind,
}

impl ListingEntry {
    /// Creates a new ListingEntry.
    pub fn new(id: String, name: String, kind: NodeKind) -> Self {
        Self { id, name, kind }
    }
}

/// Content of a folder: child folders then child files, each ordered by
/// ascending identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderListing {
    pub folders: Vec<ListingEntry>,
    pub files: Vec<ListingEntry>,
}

impl FolderListing {
    /// Total number of children, all versions included.
    pub fn len(&self) -> usize {
        self.folders.len() + self.files.len()
    }

    /// Returns true if the folder has no children.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.files.is_empty()
    }

    /// Iterates folders then files.
    pub fn iter(&self) -> impl Iterator<Item = &ListingEntry> {
        self.folders.iter().chain(self.files.iter())
    }

    /// Identifiers of the children of one kind, in listing order.
    pub fn ids(&self, kind: NodeKind) -> Vec<&str> {
        let entries = match kind {
            NodeKind::Folder => &self.folders,
            NodeKind::File => &self.files,
        };
        entries.iter().map(|e| e.id.as_str()).collect()
    }
}

fn write_entries(f: &mut fmt::Formatter<'_>, entries: &[ListingEntry]) -> fmt::Result {
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{} ({})", entry.id, entry.name)?;
    }
    Ok(())
}

impl fmt::Display for FolderListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Folders : ")?;
        write_entries(f, &self.folders)?;
        writeln!(f)?;
        write!(f, "Files   : ")?;
        write_entries(f, &self.files)
    }
}
