//! Error types for the verfs namespace.

use crate::types::NodeKind;
use thiserror::Error;

/// Every way a namespace operation can be rejected.
///
/// Navigator operations return these as values; a rejected operation never
/// leaves a partial change behind.
#[derive(Debug, Error)]
pub enum NamespaceError {
    /// Name contains `/` or does not start with an ASCII letter.
    #[error("Invalid name '{name}': {reason}")]
    InvalidName {
        name: String,
        reason: String,
    },

    /// Delete, navigation or lookup target is absent.
    #[error("{kind} not found: {name}")]
    NotFound {
        kind: NodeKind,
        name: String,
    },

    /// A folder already holds 99 distinct names of this kind.
    #[error("Too many distinct {kind} names in folder {parent_id}")]
    TooManySiblingNames {
        parent_id: String,
        kind: NodeKind,
    },

    /// A name already holds 99 versions.
    #[error("Version overflow after identifier {id}")]
    VersionOverflow {
        id: String,
    },

    /// Derived identifier is already taken in the parent's index.
    #[error("Identifier collision: {id}")]
    IdentityCollision {
        id: String,
    },

    /// Rename target is already used by a sibling.
    #[error("Name already in use: {name}")]
    AlreadyExists {
        name: String,
    },

    /// Configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be read.
    #[error("Failed to read configuration")]
    ConfigIo {
        #[from]
        #[source]
        source: std::io::Error,
    },
}

impl NamespaceError {
    pub(crate) fn invalid_name(name: &str, reason: &str) -> Self {
        NamespaceError::InvalidName {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn not_found(kind: NodeKind, name: &str) -> Self {
        NamespaceError::NotFound {
            kind,
            name: name.to_string(),
        }
    }
}

/// Result type alias for namespace operations.
pub type Result<T> = std::result::Result<T, NamespaceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NamespaceError::invalid_name("1abc", "must start with a letter");
        assert_eq!(err.to_string(), "Invalid name '1abc': must start with a letter");

        let err = NamespaceError::not_found(NodeKind::Folder, "docs");
        assert_eq!(err.to_string(), "Folder not found: docs");

        let err = NamespaceError::not_found(NodeKind::File, "a.txt");
        assert_eq!(err.to_string(), "File not found: a.txt");

        let err = NamespaceError::TooManySiblingNames {
            parent_id: "0".to_string(),
            kind: NodeKind::File,
        };
        assert_eq!(err.to_string(), "Too many distinct File names in folder 0");

        let err = NamespaceError::VersionOverflow { id: "00199".to_string() };
        assert_eq!(err.to_string(), "Version overflow after identifier 00199");

        let err = NamespaceError::IdentityCollision { id: "00100".to_string() };
        assert_eq!(err.to_string(), "Identifier collision: 00100");

        let err = NamespaceError::AlreadyExists { name: "b".to_string() };
        assert_eq!(err.to_string(), "Name already in use: b");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "config missing");
        let err: NamespaceError = io_err.into();
        assert!(matches!(err, NamespaceError::ConfigIo { .. }));
    }
}
