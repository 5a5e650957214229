//! Core trait abstractions - the pipeline's external contracts.

pub mod extractor;
pub mod reporter;
pub mod sink;

pub use extractor::Extractor;
pub use reporter::{NullReporter, ProgressReporter, TracingReporter};
pub use sink::HistorySink;
