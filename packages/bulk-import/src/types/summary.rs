//! Outcome and summary types returned by the pipeline.

use serde::{Deserialize, Serialize};

use crate::error::SinkError;
use crate::types::record::ExtractedResult;

/// Result of a batch run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Images whose extraction succeeded
    pub succeeded: usize,

    /// Images whose extraction failed
    pub failed: usize,

    /// Records appended to the review store
    pub records_staged: usize,

    /// Source ids of the failed images
    pub failed_sources: Vec<String>,
}

impl BatchOutcome {
    /// Create a new empty outcome.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether every image was extracted successfully.
    pub fn is_success(&self) -> bool {
        self.failed_sources.is_empty()
    }

    /// Total number of images attempted.
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// One record that failed to append during commit.
#[derive(Debug)]
pub struct CommitFailure {
    /// The record that could not be appended
    pub record: ExtractedResult,

    /// Why the sink refused it
    pub cause: SinkError,
}

/// Result of a commit.
#[derive(Debug, Default)]
pub struct CommitOutcome {
    /// Records accepted by the sink
    pub imported: usize,

    /// Records the sink refused, with causes
    pub failures: Vec<CommitFailure>,
}

impl CommitOutcome {
    /// Create a new empty outcome.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether every record was imported.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Counts over the current staging collection, partitioned by the
/// derived classifications. Purely derived, no stored state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingSummary {
    pub total: usize,
    pub big: usize,
    pub small: usize,
    pub odd: usize,
    pub even: usize,
}
