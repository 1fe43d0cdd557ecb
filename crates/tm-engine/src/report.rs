//! Outcome of a migration run

use serde::Serialize;
use tm_core::Direction;

/// A step that committed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedStep {
    /// Version whose SQL ran
    pub number: u32,
    /// Name of that version
    pub name: String,
    /// Which block ran
    pub direction: Direction,
    /// Marker value before the step
    pub from: u32,
    /// Marker value after the step
    pub to: u32,
    /// Number of statements executed
    pub statements: usize,
}

/// Summary of a `migrate` call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    /// Marker value when the run started
    pub from: u32,
    /// Marker value when the run finished
    pub to: u32,
    /// Steps in the order they were applied
    pub steps: Vec<AppliedStep>,
}

impl MigrationReport {
    pub(crate) fn unchanged(current: u32) -> Self {
        Self {
            from: current,
            to: current,
            steps: Vec::new(),
        }
    }

    /// True when the run changed nothing
    pub fn is_noop(&self) -> bool {
        self.steps.is_empty()
    }
}
