//! Commit coordinator - pushes accepted staging into the history sink.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::error::{ImportError, Result};
use crate::store::ReviewStore;
use crate::traits::{HistorySink, ProgressReporter};
use crate::types::{CommitFailure, CommitOutcome};

/// Configuration for commit operations.
#[derive(Debug, Clone, Default)]
pub struct CommitConfig {
    /// Drop repeated period ids before appending, keeping the first
    /// occurrence. Off by default: collisions pass through unchanged.
    pub dedupe_periods: bool,
}

impl CommitConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable first-wins period dedupe.
    pub fn with_dedupe_periods(mut self) -> Self {
        self.dedupe_periods = true;
        self
    }
}

/// Commit the current staging collection into the sink.
///
/// Fails with `SinkUnavailable` before touching anything if the sink
/// is not ready. Otherwise appends one record at a time, strictly in
/// staging order; a refused record is collected and the rest still
/// go through. On completion, failed or not, staging is cleared and
/// the outcome returned.
pub async fn commit_staged<K, R>(
    store: &ReviewStore,
    sink: &K,
    reporter: &R,
    config: &CommitConfig,
) -> Result<CommitOutcome>
where
    K: HistorySink,
    R: ProgressReporter,
{
    if !sink.is_ready().await {
        warn!("commit refused: history sink unavailable");
        return Err(ImportError::SinkUnavailable);
    }

    let mut staged = store.list();
    let total = staged.len();

    if config.dedupe_periods {
        let mut seen = HashSet::new();
        staged.retain(|record| seen.insert(record.period_id().to_string()));
        let dropped = total - staged.len();
        if dropped > 0 {
            info!(dropped, "deduped repeated period ids before commit");
            reporter.on_log(&format!("Dropped {dropped} duplicate periods"));
        }
    }

    let mut outcome = CommitOutcome::new();

    for record in staged {
        match sink.append(record.period_id(), record.sum()).await {
            Ok(()) => outcome.imported += 1,
            Err(cause) => {
                warn!(period_id = %record.period_id(), error = %cause, "sink refused record");
                reporter.on_log(&format!("Sink refused {}: {cause}", record.period_id()));
                outcome.failures.push(CommitFailure { record, cause });
            }
        }
    }

    store.clear();

    info!(
        imported = outcome.imported,
        failed = outcome.failures.len(),
        "commit complete"
    );
    reporter.on_log(&format!(
        "Imported {} of {total} records",
        outcome.imported
    ));

    Ok(outcome)
}
