//! Deterministic fixture extractor for reproducible tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{ExtractError, ExtractResult};
use crate::traits::Extractor;
use crate::types::{ImageResource, RawReading};

/// An extractor that returns predefined readings per source id.
///
/// Stands in for the recognition backend in tests: configure
/// readings and failures up front, then assert on the call log.
#[derive(Default)]
pub struct FixtureExtractor {
    /// Predefined readings by source id
    readings: Arc<RwLock<HashMap<String, Vec<RawReading>>>>,

    /// Source ids that should fail
    fail_sources: Arc<RwLock<Vec<String>>>,

    /// Source ids extract() was called with, in order
    calls: Arc<RwLock<Vec<String>>>,
}

impl FixtureExtractor {
    /// Create a new fixture with no readings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add predefined readings for a source.
    pub fn with_readings(
        self,
        source_id: impl Into<String>,
        readings: Vec<RawReading>,
    ) -> Self {
        self.readings
            .write()
            .unwrap()
            .insert(source_id.into(), readings);
        self
    }

    /// Mark a source as failing.
    pub fn fail_source(self, source_id: impl Into<String>) -> Self {
        self.fail_sources.write().unwrap().push(source_id.into());
        self
    }

    /// Source ids extracted so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Extractor for FixtureExtractor {
    async fn extract(&self, image: &ImageResource) -> ExtractResult<Vec<RawReading>> {
        self.calls.write().unwrap().push(image.source_id.clone());

        if self
            .fail_sources
            .read()
            .unwrap()
            .contains(&image.source_id)
        {
            return Err(ExtractError::Recognition {
                source_id: image.source_id.clone(),
                cause: "fixture failure".into(),
            });
        }

        Ok(self
            .readings
            .read()
            .unwrap()
            .get(&image.source_id)
            .cloned()
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "fixture"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returns_configured_readings() {
        let extractor = FixtureExtractor::new()
            .with_readings("a", vec![RawReading::new("20240105130200001", 7)]);

        let readings = extractor
            .extract(&ImageResource::new("a", vec![0u8]))
            .await
            .unwrap();
        assert_eq!(readings.len(), 1);

        // Unknown source yields no readings, not an error
        let readings = extractor
            .extract(&ImageResource::new("unknown", vec![0u8]))
            .await
            .unwrap();
        assert!(readings.is_empty());
    }

    #[tokio::test]
    async fn test_fail_source() {
        let extractor = FixtureExtractor::new().fail_source("bad");
        let err = extractor
            .extract(&ImageResource::new("bad", vec![0u8]))
            .await
            .unwrap_err();
        assert_eq!(err.source_id(), "bad");
    }

    #[tokio::test]
    async fn test_call_tracking() {
        let extractor = FixtureExtractor::new();
        extractor
            .extract(&ImageResource::new("x", vec![0u8]))
            .await
            .unwrap();
        extractor
            .extract(&ImageResource::new("y", vec![0u8]))
            .await
            .unwrap();
        assert_eq!(extractor.calls(), vec!["x".to_string(), "y".to_string()]);
    }
}
