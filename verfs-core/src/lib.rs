//! # verfs Core
//!
//! An in-memory, versioned filesystem namespace: a tree of folders and files
//! where every node carries a composite identifier encoding its parent, its
//! sibling-name group and its version.
//!
//! ## Overview
//!
//! Creating a name that already exists in a folder does not fail; it adds a
//! new version of that name. Navigation picks a version explicitly, and
//! deletion removes every version of a name at once.
//!
//! ## Basic Usage
//!
//! ```rust
//! use verfs_core::{Navigator, NamespaceTree};
//!
//! let mut tree = NamespaceTree::new();
//! let mut nav = Navigator::new(&mut tree);
//!
//! nav.create_folder("docs").unwrap();
//! nav.create_folder("docs").unwrap();
//! nav.change_directory("docs", 2, true).unwrap();
//! nav.create_file("notes.txt", "hello").unwrap();
//!
//! assert_eq!(nav.current_directory(), "/docs");
//! assert_eq!(nav.folder_metadata().id, "00101");
//! ```
//!
//! ## Architecture
//!
//! - [`identity`]: identifier derivation, version bumping, name validation
//! - [`node`]: folder and file nodes with their child indexes
//! - [`tree`]: arena that owns every node
//! - [`navigator`]: current-directory cursor and the mutation entry point
//! - [`types`]: read-only metadata and listing views
//! - [`config`]: tree configuration
//! - [`stats`]: operation outcome counters
//! - [`error`]: error types and handling

pub mod config;
pub mod error;
pub mod identity;
pub mod navigator;
pub mod node;
pub mod stats;
pub mod tree;
pub mod types;

pub use config::{GroupAllocation, LogLevel, NamespaceConfig};
pub use error::{NamespaceError, Result};
pub use identity::NodeId;
pub use navigator::Navigator;
pub use node::{FileNode, FolderNode, Node, NodeKey};
pub use stats::{OperationStats, OperationType};
pub use tree::NamespaceTree;
pub use types::{FileMetadata, FolderListing, FolderMetadata, ListingEntry, NodeKind};
