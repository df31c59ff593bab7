//! Outcome counters for navigator operations.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Navigator operations that are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OperationType {
    CreateFolder,
    CreateFile,
    DeleteFolder,
    DeleteFile,
    ChangeDirectory,
    WriteFile,
    RenameFile,
}

impl OperationType {
    /// Every counted operation, in reporting order.
    pub const ALL: [OperationType; 7] = [
        OperationType::CreateFolder,
        OperationType::CreateFile,
        OperationType::DeleteFolder,
        OperationType::DeleteFile,
        OperationType::ChangeDirectory,
        OperationType::WriteFile,
        OperationType::RenameFile,
    ];

    /// Returns a human-readable name for the operation type.
    pub fn name(&self) -> &'static str {
        match self {
            OperationType::CreateFolder => "create_folder",
            OperationType::CreateFile => "create_file",
            OperationType::DeleteFolder => "delete_folder",
            OperationType::DeleteFile => "delete_file",
            OperationType::ChangeDirectory => "change_directory",
            OperationType::WriteFile => "write_file",
            OperationType::RenameFile => "rename_file",
        }
    }
}

/// Successes and failures of one operation type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCount {
    pub succeeded: u64,
    pub failed: u64,
}

impl OutcomeCount {
    pub fn total(&self) -> u64 {
        self.succeeded + self.failed
    }
}

/// Per-operation outcome counters kept by a navigator.
#[derive(Debug, Clone, Default)]
pub struct OperationStats {
    counts: HashMap<OperationType, OutcomeCount>,
}

impl OperationStats {
    /// Creates a new OperationStats instance with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&mut self, op: OperationType) {
        self.counts.entry(op).or_default().succeeded += 1;
    }

    pub fn record_failure(&mut self, op: OperationType) {
        self.counts.entry(op).or_default().failed += 1;
    }

    /// Counters for `op`; zero if it never ran.
    pub fn get(&self, op: OperationType) -> OutcomeCount {
        self.counts.get(&op).copied().unwrap_or_default()
    }

    pub fn total_succeeded(&self) -> u64 {
        self.counts.values().map(|c| c.succeeded).sum()
    }

    pub fn total_failed(&self) -> u64 {
        self.counts.values().map(|c| c.failed).sum()
    }

    /// Resets all statistics to zero.
    pub fn reset(&mut self) {
        self.counts.clear();
    }
}

impl fmt::Display for OperationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for op in OperationType::ALL {
            let count = self.get(op);
            if count.total() == 0 {
                continue;
            }
            writeln!(f, "{:<18} ok={} failed={}", op.name(), count.succeeded, count.failed)?;
        }
        write!(
            f,
            "{:<18} ok={} failed={}",
            "total",
            self.total_succeeded(),
            self.total_failed()
        )
    }
}
