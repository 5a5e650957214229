//! Progress reporter trait - observer fed by the batch driver.
//!
//! The pipeline is pure; any renderer subscribes through this
//! interface instead of interleaving UI calls with batch logic.

/// Observer for batch progress and log lines.
///
/// `on_progress(completed, total)` is invoked once per item, after
/// that item's extraction finishes and before the next one starts.
pub trait ProgressReporter: Send + Sync {
    /// Called after each item, success or failure.
    fn on_progress(&self, completed: usize, total: usize);

    /// Human-readable pipeline event.
    fn on_log(&self, message: &str);
}

/// Reporter that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl ProgressReporter for NullReporter {
    fn on_progress(&self, _completed: usize, _total: usize) {}

    fn on_log(&self, _message: &str) {}
}

/// Reporter that forwards events to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn on_progress(&self, completed: usize, total: usize) {
        tracing::info!(completed, total, "batch progress");
    }

    fn on_log(&self, message: &str) {
        tracing::info!("{message}");
    }
}
