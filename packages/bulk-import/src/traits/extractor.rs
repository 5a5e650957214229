//! Extractor trait for pluggable record extraction.
//!
//! The extraction capability is injected: production uses an OCR
//! backend, tests use a deterministic fixture. Either way the
//! contract is the same — zero or more raw readings per image, with
//! failures local to the offending item and no side effects.

use async_trait::async_trait;

use crate::error::ExtractResult;
use crate::types::{ImageResource, RawReading};

/// Extracts raw period/sum readings from one image resource.
///
/// Implementations:
/// - `OcrExtractor` - recognition backend plus table-format parsing
/// - `FixtureExtractor` - predefined readings for reproducible tests
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract readings from a single image.
    ///
    /// Returns zero or more readings. Readings are validated at the
    /// pipeline boundary before they reach staging; extractors only
    /// need to report what they saw.
    async fn extract(&self, image: &ImageResource) -> ExtractResult<Vec<RawReading>>;

    /// Extractor name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
