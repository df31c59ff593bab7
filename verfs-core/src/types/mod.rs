// Module declarations
pub mod metadata;
pub mod listing;

// Re-export all types from submodules
pub use metadata::{NodeKind, FolderMetadata, FileMetadata};
pub use listing::{ListingEntry, FolderListing};
