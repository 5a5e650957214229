//! Screenshot Bulk-Import Pipeline
//!
//! Turns a batch of raw screenshots into reviewed, committed game
//! history: extract structured records from each image, stage them
//! for human review and edits, then append the accepted records to
//! an external history sink.
//!
//! # Design
//!
//! - Capabilities are injected, never ambient: the recognition
//!   backend ([`extractors::OcrEngine`]), the history store
//!   ([`traits::HistorySink`]), and the progress observer
//!   ([`traits::ProgressReporter`]) are all traits.
//! - Per-item failures never abort a batch; they are logged and
//!   reported in aggregate. Only missing preconditions are fatal.
//! - Records carry stable ids and classifications derived at
//!   creation, so review edits cannot corrupt them.
//!
//! # Usage
//!
//! ```rust,ignore
//! use bulk_import::{Importer, TracingReporter};
//! use bulk_import::extractors::OcrExtractor;
//!
//! let importer = Importer::new(OcrExtractor::new(engine), TracingReporter);
//!
//! // Extract and stage
//! let outcome = importer.run(&images).await?;
//!
//! // ... user reviews importer.store(), deletes bad rows ...
//!
//! // Commit accepted records into the history
//! let committed = importer.commit(&sink).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - External contracts (Extractor, HistorySink, ProgressReporter)
//! - [`types`] - Domain types (ExtractedResult, ImageResource, outcomes)
//! - [`pipeline`] - Batch driver, commit coordinator, Importer facade
//! - [`store`] - The review staging collection
//! - [`extractors`] - Extractor implementations (OCR, fixture)
//! - [`period`] - Period id parsing and validation
//! - [`testing`] - Recording mocks for tests

pub mod error;
pub mod extractors;
pub mod period;
pub mod pipeline;
pub mod store;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{
    ExtractError, ExtractResult, ImportError, Result, ReviewError, SinkError, SinkResult,
    ValidationError,
};
pub use pipeline::{commit_staged, run_batch, CommitConfig, Importer};
pub use store::ReviewStore;
pub use traits::{
    Extractor, HistorySink, NullReporter, ProgressReporter, TracingReporter,
};
pub use types::{
    BatchOutcome, BigSmall, CommitFailure, CommitOutcome, ExtractedResult, ImageResource, Parity,
    RawReading, RecordId, StagingSummary,
};

// Re-export extractors and testing helpers
pub use extractors::{FixtureExtractor, OcrEngine, OcrExtractor};
pub use testing::{CollectingReporter, RecordingSink, SinkCall};
