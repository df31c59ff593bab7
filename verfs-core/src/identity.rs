//! Composite node identifiers.
//!
//! Every non-root identifier is `<parent id><group><version>` where `group`
//! and `version` are two-digit decimal fields. Siblings sharing a name share
//! the group digits and form a version chain `00`, `01`, `02`, ... in
//! insertion order. The root carries the sentinel identifier `"0"`.

use crate::error::{NamespaceError, Result};
use crate::types::NodeKind;
use std::fmt;
use tracing::trace;

/// Identifier of the root folder.
pub const ROOT_ID: &str = "0";

/// Width of the group field and of the version field.
const FIELD_WIDTH: usize = 2;

/// Groups run `01..=99`; a 100th distinct name has no group left.
const GROUP_LIMIT: usize = 100;

/// Versions run `00..=98`, so a name holds at most 99 instances.
const VERSION_LIMIT: u32 = 99;

/// Composite identifier of a namespace node.
///
/// Ordering is plain string ordering. Children of one folder all have the
/// same length, so this matches numeric order within a listing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(String);

impl NodeId {
    /// The root sentinel.
    pub fn root() -> Self {
        Self(ROOT_ID.to_string())
    }

    /// Builds a child identifier from already formatted fields.
    fn child(parent: &NodeId, group: &str, version: &str) -> Self {
        Self(format!("{}{}{}", parent.0, group, version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT_ID
    }

    /// Everything before the trailing group and version fields.
    pub fn parent_prefix(&self) -> Option<&str> {
        self.split_fields().map(|(prefix, _, _)| prefix)
    }

    /// The two group digits, `None` for the root.
    pub fn sibling_group(&self) -> Option<&str> {
        self.split_fields().map(|(_, group, _)| group)
    }

    /// The two version digits, `None` for the root.
    pub fn version(&self) -> Option<&str> {
        self.split_fields().map(|(_, _, version)| version)
    }

    fn split_fields(&self) -> Option<(&str, &str, &str)> {
        let len = self.0.len();
        if self.is_root() || len < ROOT_ID.len() + 2 * FIELD_WIDTH || !self.0.is_ascii() {
            return None;
        }
        let version_start = len - FIELD_WIDTH;
        let group_start = version_start - FIELD_WIDTH;
        Some((
            &self.0[..group_start],
            &self.0[group_start..version_start],
            &self.0[version_start..],
        ))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Returns everything after the last `.` of `name`, or `""` if there is none.
pub fn extension_of(name: &str) -> &str {
    name.rfind('.').map(|idx| &name[idx + 1..]).unwrap_or("")
}

/// Increments a two-digit version string, carrying from the low digit into
/// the high digit.
///
/// Returns `None` when the version is already `99` or is not two ASCII digits.
pub fn bump_version(version: &str) -> Option<String> {
    let [hi, lo]: [u8; FIELD_WIDTH] = version.as_bytes().try_into().ok()?;
    if !hi.is_ascii_digit() || !lo.is_ascii_digit() {
        return None;
    }

    let bumped = if lo == b'9' {
        if hi == b'9' {
            return None;
        }
        [hi + 1, b'0']
    } else {
        [hi, lo + 1]
    };

    String::from_utf8(bumped.to_vec()).ok()
}

/// Checks that `name` can be used for a folder or file.
pub fn validate_name(name: &str) -> Result<()> {
    let Some(first) = name.chars().next() else {
        return Err(NamespaceError::invalid_name(name, "name must not be empty"));
    };
    if name.contains('/') {
        return Err(NamespaceError::invalid_name(name, "name cannot contain \"/\""));
    }
    if !first.is_ascii_alphabetic() {
        return Err(NamespaceError::invalid_name(name, "name must start with a letter"));
    }
    Ok(())
}

/// Derives the identifier for a new child of `parent_id`.
///
/// `latest_same_name` is the most recently inserted sibling of the same kind
/// and name, if any; the new node continues its version chain. Otherwise the
/// node opens a new sibling group numbered `fresh_group`.
pub fn derive_id(
    parent_id: &NodeId,
    kind: NodeKind,
    latest_same_name: Option<&NodeId>,
    fresh_group: usize,
) -> Result<NodeId> {
    let id = match latest_same_name {
        None => {
            if fresh_group >= GROUP_LIMIT {
                return Err(NamespaceError::TooManySiblingNames {
                    parent_id: parent_id.to_string(),
                    kind,
                });
            }
            let group = format!("{:0width$}", fresh_group, width = FIELD_WIDTH);
            NodeId::child(parent_id, &group, "00")
        }
        Some(latest) => {
            let (group, version) = latest
                .sibling_group()
                .zip(latest.version())
                .ok_or_else(|| NamespaceError::IdentityCollision { id: latest.to_string() })?;
            let overflow = || NamespaceError::VersionOverflow { id: latest.to_string() };
            let bumped = bump_version(version).ok_or_else(overflow)?;
            if bumped.parse::<u32>().map_or(true, |v| v >= VERSION_LIMIT) {
                return Err(overflow());
            }
            NodeId::child(parent_id, group, &bumped)
        }
    };

    trace!("Derived {} id {} under {}", kind.as_str(), id, parent_id);
    Ok(id)
}

/// Identifier of the `version`-th (1-based) instance in the sibling group of
/// `first`, the earliest inserted instance of a name.
pub fn versioned_id(first: &NodeId, version: u32) -> Option<NodeId> {
    let index = version.checked_sub(1)?;
    if index >= VERSION_LIMIT {
        return None;
    }
    let prefix = first.parent_prefix()?;
    let group = first.sibling_group()?;
    Some(NodeId(format!(
        "{}{}{:0width$}",
        prefix,
        group,
        index,
        width = FIELD_WIDTH
    )))
}
