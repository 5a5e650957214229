//! Testing utilities: a recording sink and a collecting reporter.
//!
//! Useful for testing applications that use the pipeline without a
//! real history store or UI. `FixtureExtractor` lives with the other
//! extractors.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::error::{SinkError, SinkResult};
use crate::traits::{HistorySink, ProgressReporter};

/// One recorded sink invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    Append { period_id: String, sum: u8 },
}

impl SinkCall {
    /// Shorthand for an expected append call.
    pub fn append(period_id: impl Into<String>, sum: u8) -> Self {
        Self::Append {
            period_id: period_id.into(),
            sum,
        }
    }
}

/// A history sink that records every call for assertions.
#[derive(Default)]
pub struct RecordingSink {
    ready: bool,

    /// Period ids whose append should be refused
    fail_periods: Arc<RwLock<Vec<String>>>,

    /// Every call made, in order
    calls: Arc<RwLock<Vec<SinkCall>>>,
}

impl RecordingSink {
    /// Create a ready sink.
    pub fn new() -> Self {
        Self {
            ready: true,
            ..Default::default()
        }
    }

    /// Create a sink that reports itself unavailable.
    pub fn unavailable() -> Self {
        Self {
            ready: false,
            ..Default::default()
        }
    }

    /// Refuse appends for the given period id.
    pub fn fail_period(self, period_id: impl Into<String>) -> Self {
        self.fail_periods.write().unwrap().push(period_id.into());
        self
    }

    /// All calls made to this sink, in order.
    pub fn calls(&self) -> Vec<SinkCall> {
        self.calls.read().unwrap().clone()
    }

    /// The appended history as (period_id, sum) pairs.
    pub fn history(&self) -> Vec<(String, u8)> {
        self.calls
            .read()
            .unwrap()
            .iter()
            .map(|SinkCall::Append { period_id, sum }| (period_id.clone(), *sum))
            .collect()
    }
}

#[async_trait]
impl HistorySink for RecordingSink {
    async fn is_ready(&self) -> bool {
        self.ready
    }

    async fn append(&self, period_id: &str, sum: u8) -> SinkResult<()> {
        if self
            .fail_periods
            .read()
            .unwrap()
            .iter()
            .any(|p| p == period_id)
        {
            return Err(SinkError::Rejected {
                reason: format!("configured failure for {period_id}"),
            });
        }

        self.calls
            .write()
            .unwrap()
            .push(SinkCall::append(period_id, sum));
        Ok(())
    }
}

/// A reporter that captures progress events and log lines.
#[derive(Default)]
pub struct CollectingReporter {
    progress: Arc<RwLock<Vec<(usize, usize)>>>,
    logs: Arc<RwLock<Vec<String>>>,
}

impl CollectingReporter {
    /// Create a new empty reporter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured `(completed, total)` events, in order.
    pub fn progress(&self) -> Vec<(usize, usize)> {
        self.progress.read().unwrap().clone()
    }

    /// Captured log lines, in order.
    pub fn logs(&self) -> Vec<String> {
        self.logs.read().unwrap().clone()
    }
}

impl ProgressReporter for CollectingReporter {
    fn on_progress(&self, completed: usize, total: usize) {
        self.progress.write().unwrap().push((completed, total));
    }

    fn on_log(&self, message: &str) {
        self.logs.write().unwrap().push(message.to_string());
    }
}
