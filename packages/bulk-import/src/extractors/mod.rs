//! Extractor implementations.

pub mod fixture;
pub mod ocr;

pub use fixture::FixtureExtractor;
pub use ocr::{parse_readings, OcrEngine, OcrExtractor};
