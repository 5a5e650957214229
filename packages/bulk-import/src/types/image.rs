//! The raw image resource carrier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One raw image resource submitted for import.
///
/// The pipeline treats the bytes as opaque; only the extractor's
/// recognition backend interprets them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageResource {
    /// Identifier for this image (file name, upload id, ...)
    pub source_id: String,

    /// Raw image bytes
    pub data: Vec<u8>,

    /// MIME type if known (e.g. "image/png")
    pub content_type: Option<String>,

    /// When the image was captured or uploaded
    pub captured_at: DateTime<Utc>,

    /// Source-specific metadata (e.g. upload headers)
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

impl ImageResource {
    /// Create a new image resource with minimal fields.
    pub fn new(source_id: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            source_id: source_id.into(),
            data: data.into(),
            content_type: None,
            captured_at: Utc::now(),
            metadata: HashMap::new(),
        }
    }

    /// Set the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Set the captured timestamp.
    pub fn with_captured_at(mut self, captured_at: DateTime<Utc>) -> Self {
        self.captured_at = captured_at;
        self
    }

    /// Add a metadata key-value pair.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Content length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check whether the resource carries any bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
