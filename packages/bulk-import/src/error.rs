//! Typed errors for the bulk-import pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Failures that affect a
//! single unit of work (one image, one record) are absorbed locally
//! and reported in aggregate; only preconditions are fatal to `run`
//! or `commit`.

use thiserror::Error;

use crate::types::record::RecordId;

/// Errors that can occur while driving the pipeline.
///
/// The batch driver and commit coordinator absorb per-item failures
/// themselves and only ever return `SinkUnavailable` or `Cancelled`.
/// The `Extract`/`Validation`/`Review` variants exist for callers
/// composing their own flows over the lower-level pieces: `#[from]`
/// lets a `?` on an extractor call or a staging edit lift the typed
/// error into this one.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Extraction failed for a single image
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    /// A record violated a domain invariant
    #[error("invalid record: {0}")]
    Validation(#[from] ValidationError),

    /// Staging edit failed
    #[error("staging edit failed: {0}")]
    Review(#[from] ReviewError),

    /// History sink unavailable at commit time
    #[error("history sink is not available")]
    SinkUnavailable,

    /// Batch was cancelled between items
    #[error("batch cancelled")]
    Cancelled,
}

/// Errors that can occur while extracting records from one image.
///
/// Always local to the offending image: the batch driver logs these
/// and continues with the next item.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The recognition backend failed
    #[error("recognition failed for {source_id}: {cause}")]
    Recognition {
        source_id: String,
        #[source]
        cause: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Image format not accepted by this extractor
    #[error("unsupported format for {source_id}: {format}")]
    UnsupportedFormat { source_id: String, format: String },

    /// Image resource has no content
    #[error("empty image resource: {source_id}")]
    EmptyImage { source_id: String },
}

impl ExtractError {
    /// Identifier of the image this error originated from.
    pub fn source_id(&self) -> &str {
        match self {
            Self::Recognition { source_id, .. } => source_id,
            Self::UnsupportedFormat { source_id, .. } => source_id,
            Self::EmptyImage { source_id } => source_id,
        }
    }
}

/// A record failed a domain invariant check before staging.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Sum outside the valid dice range
    #[error("sum {sum} outside valid range 3..=18")]
    SumOutOfRange { sum: i64 },

    /// Period id is not a plausible digit string
    #[error("malformed period id: {period_id:?}")]
    MalformedPeriodId { period_id: String },
}

/// Invalid edit on the review store, surfaced synchronously.
#[derive(Debug, Error)]
pub enum ReviewError {
    /// Position outside `[0, len)`
    #[error("index {index} out of range for staging of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// No staged record with the given id
    #[error("no staged record with id {id}")]
    UnknownRecord { id: RecordId },
}

/// A single record failed to append to the history sink.
///
/// Collected into `CommitOutcome::failures`; never aborts the
/// remaining records.
#[derive(Debug, Error)]
pub enum SinkError {
    /// The sink rejected the record
    #[error("append rejected: {reason}")]
    Rejected { reason: String },

    /// Underlying sink failure
    #[error("sink error: {0}")]
    Other(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ImportError>;

/// Result type alias for extractor operations.
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

/// Result type alias for sink operations.
pub type SinkResult<T> = std::result::Result<T, SinkError>;
