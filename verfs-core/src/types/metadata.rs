use serde::{Deserialize, Serialize};
use std::fmt;

/// Which index of a folder a node lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Folder node
    Folder,
    /// File node
    File,
}

impl NodeKind {
    /// Returns the lowercase name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Folder => "folder",
            NodeKind::File => "file",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Folder => write!(f, "Folder"),
            NodeKind::File => write!(f, "File"),
        }
    }
}

/// Snapshot of a folder's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderMetadata {
    /// Composite identifier
    pub id: String,
    /// Folder name
    pub name: String,
    /// Fully-qualified path from the root
    pub path: String,
    /// Number of distinct child folder names
    pub unique_folder_count: usize,
    /// Number of distinct child file names
    pub unique_file_count: usize,
}

impl fmt::Display for FolderMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Folder Path  : {}", self.path)?;
        writeln!(f, "Folder Count : {}", self.unique_folder_count)?;
        writeln!(f, "File Count   : {}", self.unique_file_count)?;
        write!(f, "Folder Name  : {}", self.name)
    }
}

/// Snapshot of a file's metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Composite identifier
    pub id: String,
    /// File name
    pub name: String,
    /// Fully-qualified path from the root
    pub path: String,
    /// Suffix after the last `.` of the name, empty if none
    pub extension: String,
    /// Content length in bytes
    pub size: usize,
    /// Two-digit version taken from the identifier
    pub version: String,
}

impl fmt::Display for FileMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File Size      : {}", self.size)?;
        writeln!(f, "File Path      : {}", self.path)?;
        writeln!(f, "File Extension : {}", self.extension)?;
        writeln!(f, "File Id        : {}", self.id)?;
        writeln!(f, "File Name      : {}", self.name)?;
        write!(f, "File Version   : {}", self.version)
    }
}
