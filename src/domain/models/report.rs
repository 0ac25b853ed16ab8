//! Run summaries.

use serde::{Deserialize, Serialize};

use super::issue::UnresolvedAssignee;

/// Outcome of one write phase (creates or updates).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseSummary {
    /// Operations the store accepted.
    pub applied: usize,
    /// Size of every batch issued, in order.
    pub batch_sizes: Vec<usize>,
}

impl PhaseSummary {
    pub fn batches(&self) -> usize {
        self.batch_sizes.len()
    }
}

/// Summary of a completed sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Records found in the store when the identity map was built.
    pub records_scanned: usize,
    /// Issues kept after pull requests were dropped.
    pub issues_fetched: usize,
    pub pull_requests_skipped: usize,
    pub planned_creates: usize,
    pub planned_updates: usize,
    pub create_phase: PhaseSummary,
    pub update_phase: PhaseSummary,
    pub unresolved_assignees: Vec<UnresolvedAssignee>,
    pub dry_run: bool,
}

impl SyncReport {
    pub const fn created(&self) -> usize {
        self.create_phase.applied
    }

    pub const fn updated(&self) -> usize {
        self.update_phase.applied
    }
}
