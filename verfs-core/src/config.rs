//! Configuration types for verfs.

use crate::error::{NamespaceError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Log level requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    /// Successful mutations and navigation
    Debug,
    /// Also every derived identifier
    Trace,
}

impl LogLevel {
    /// Directive understood by `EnvFilter`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ]
        .into_iter()
        .find(|level| level.as_str().eq_ignore_ascii_case(s))
        .ok_or_else(|| format!("expected one of error, warn, info, debug, trace; got '{}'", s))
    }
}

/// How a folder numbers the sibling group of a name it has not seen before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupAllocation {
    /// Distinct names currently present + 1. A freed group number can be
    /// handed out again and may clash with a live sibling's identifier, in
    /// which case creation fails with `IdentityCollision`.
    #[default]
    UniqueCount,
    /// Distinct names ever opened in the folder + 1. Group numbers are never
    /// recycled, so 99 names can be opened over the folder's lifetime.
    Monotonic,
}

/// Configuration for a namespace tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceConfig {
    /// Logging level for the driving process
    pub log_level: LogLevel,

    /// Name given to the root folder
    pub root_name: String,

    /// Sibling group numbering strategy
    pub group_allocation: GroupAllocation,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            root_name: "root".to_string(),
            group_allocation: GroupAllocation::UniqueCount,
        }
    }
}

impl NamespaceConfig {
    /// Creates a new NamespaceConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config suitable for development/testing.
    pub fn development() -> Self {
        Self {
            log_level: LogLevel::Debug,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.root_name.is_empty() {
            errors.push("root_name must not be empty".to_string());
        }
        if self.root_name.contains('/') {
            errors.push(format!("root_name cannot contain \"/\": {}", self.root_name));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| NamespaceError::InvalidConfig(e.to_string()))?;
        config
            .validate()
            .map_err(|errors| NamespaceError::InvalidConfig(errors.join("; ")))?;
        Ok(config)
    }

    /// Loads and validates a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}
