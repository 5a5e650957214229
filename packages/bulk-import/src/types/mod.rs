//! Domain data types.

pub mod image;
pub mod record;
pub mod summary;

pub use image::ImageResource;
pub use record::{BigSmall, ExtractedResult, Parity, RawReading, RecordId};
pub use summary::{BatchOutcome, CommitFailure, CommitOutcome, StagingSummary};
