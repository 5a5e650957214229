//! OCR-backed extractor.
//!
//! The recognition backend is an injected capability; this module
//! owns everything around it: input guards, error shaping, and
//! parsing of the recognized text into readings.

use async_trait::async_trait;
use regex::Regex;

use crate::error::{ExtractError, ExtractResult};
use crate::traits::Extractor;
use crate::types::{ImageResource, RawReading};

/// The injected text-recognition capability.
///
/// Implementations talk to whatever OCR engine is available (a
/// Tesseract sidecar, a vision API, a canned transcript in tests).
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognize text in an image.
    async fn recognize(
        &self,
        image: &ImageResource,
    ) -> std::result::Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

const DEFAULT_ACCEPTED_TYPES: &[&str] = &["image/png", "image/jpeg", "image/jpg", "image/webp"];

/// Extractor that runs an OCR engine and parses game results out of
/// the recognized text.
pub struct OcrExtractor<O: OcrEngine> {
    engine: O,
    accepted_types: Vec<String>,
}

impl<O: OcrEngine> OcrExtractor<O> {
    /// Create an extractor accepting the common screenshot formats.
    pub fn new(engine: O) -> Self {
        Self {
            engine,
            accepted_types: DEFAULT_ACCEPTED_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }

    /// Accept an additional content type.
    pub fn with_accepted_type(mut self, content_type: impl Into<String>) -> Self {
        self.accepted_types.push(content_type.into());
        self
    }

    fn check_input(&self, image: &ImageResource) -> ExtractResult<()> {
        if image.is_empty() {
            return Err(ExtractError::EmptyImage {
                source_id: image.source_id.clone(),
            });
        }
        if let Some(content_type) = &image.content_type {
            if !self.accepted_types.iter().any(|t| t == content_type) {
                return Err(ExtractError::UnsupportedFormat {
                    source_id: image.source_id.clone(),
                    format: content_type.clone(),
                });
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<O: OcrEngine> Extractor for OcrExtractor<O> {
    async fn extract(&self, image: &ImageResource) -> ExtractResult<Vec<RawReading>> {
        self.check_input(image)?;

        let text = self
            .engine
            .recognize(image)
            .await
            .map_err(|cause| ExtractError::Recognition {
                source_id: image.source_id.clone(),
                cause,
            })?;

        Ok(parse_readings(&text))
    }

    fn name(&self) -> &str {
        "ocr"
    }
}

/// Parse recognized table text into period/sum readings.
///
/// Result tables render one round per row: a long period number
/// followed by the round's sum. OCR flattens that into a number
/// stream, so the heuristic walks the numbers in order and pairs each
/// period-shaped one (16+ digits, current-century prefix) with an
/// immediately following value in the dice range. Anything else is
/// noise and skipped.
pub fn parse_readings(text: &str) -> Vec<RawReading> {
    let number = Regex::new(r"\d+").unwrap();
    let numbers: Vec<&str> = number.find_iter(text).map(|m| m.as_str()).collect();

    let mut readings = Vec::new();
    let mut i = 0;
    while i + 1 < numbers.len() {
        if looks_like_period(numbers[i]) {
            if let Ok(sum) = numbers[i + 1].parse::<i64>() {
                if (3..=18).contains(&sum) {
                    readings.push(RawReading::new(numbers[i], sum));
                    i += 2;
                    continue;
                }
            }
        }
        i += 1;
    }

    readings
}

fn looks_like_period(s: &str) -> bool {
    s.len() >= 16 && s.len() <= 19 && s.starts_with("20")
}
