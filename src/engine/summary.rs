//! engine::summary
//!
//! Per-section counters for hydration and cleanup runs.
//!
//! A summary is created fresh by the orchestrator, updated as items are
//! processed and handed back to the caller for reporting.

use std::fmt;

/// Outcome counters for one section of a hydration run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Follow-up steps (labels, assignees) that failed on created items.
    pub incomplete: usize,
    /// One message per failed item or failed follow-up step, in processing order.
    pub failures: Vec<String>,
}

impl SectionSummary {
    pub fn record_success(&mut self) {
        self.total += 1;
        self.succeeded += 1;
    }

    pub fn record_failure(&mut self, message: impl Into<String>) {
        self.total += 1;
        self.failed += 1;
        self.failures.push(message.into());
    }

    /// A follow-up step failed on an item that exists. The item still counts as a success.
    pub fn record_incomplete(&mut self, message: impl Into<String>) {
        self.incomplete += 1;
        self.failures.push(message.into());
    }

    /// True if nothing was attempted.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl fmt::Display for SectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} succeeded", self.succeeded, self.total)?;
        if self.failed > 0 {
            write!(f, ", {} failed", self.failed)?;
        }
        if self.incomplete > 0 {
            write!(f, ", {} incomplete", self.incomplete)?;
        }
        Ok(())
    }
}

/// Outcome counters for one content type during cleanup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupSummary {
    pub deleted: usize,
    pub preserved: usize,
    pub errors: Vec<String>,
}

impl CleanupSummary {
    /// True if nothing was deleted, preserved or attempted.
    pub fn is_empty(&self) -> bool {
        self.deleted == 0 && self.preserved == 0 && self.errors.is_empty()
    }
}

impl fmt::Display for CleanupSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} deleted, {} preserved", self.deleted, self.preserved)?;
        if !self.errors.is_empty() {
            write!(f, ", {} failed", self.errors.len())?;
        }
        Ok(())
    }
}
