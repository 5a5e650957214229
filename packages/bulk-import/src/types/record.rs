//! The extracted record type and its derived classifications.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::period;

/// Stable, opaque identifier assigned to a record at creation.
///
/// Review edits address records by id rather than by position, so
/// concurrent UI deletions cannot hit a shifted index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a fresh id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Big/Small classification of a sum, at threshold 11.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BigSmall {
    Big,
    Small,
}

impl BigSmall {
    /// `Big` iff `sum >= 11`.
    pub fn from_sum(sum: u8) -> Self {
        if sum >= 11 {
            Self::Big
        } else {
            Self::Small
        }
    }
}

/// Parity classification of a sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parity {
    Odd,
    Even,
}

impl Parity {
    /// `Even` iff `sum % 2 == 0`.
    pub fn from_sum(sum: u8) -> Self {
        if sum % 2 == 0 {
            Self::Even
        } else {
            Self::Odd
        }
    }
}

/// One raw period/sum pair produced by an extractor, before
/// validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReading {
    /// Digit-string round identifier as read from the image
    pub period_id: String,

    /// Numeric outcome as read from the image (not yet range-checked)
    pub sum: i64,
}

impl RawReading {
    /// Create a new reading.
    pub fn new(period_id: impl Into<String>, sum: i64) -> Self {
        Self {
            period_id: period_id.into(),
            sum,
        }
    }
}

/// One parsed game outcome, staged for review.
///
/// Fields are private: the validating constructors are the only way
/// to build one, so `big_small` and `parity` can never be stored
/// inconsistently with `sum`. Deserialization funnels through the
/// same checks (see `RawRecord`), so a serialized record is no back
/// door either.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct ExtractedResult {
    id: RecordId,
    source_id: String,
    period_id: String,
    sum: u8,
    big_small: BigSmall,
    parity: Parity,
    extracted_at: DateTime<Utc>,
}

impl ExtractedResult {
    /// Build a record, validating the domain invariants.
    ///
    /// Rejects sums outside `3..=18` and period ids that are not
    /// plausible digit strings. Derived classifications are computed
    /// here, once.
    pub fn new(
        source_id: impl Into<String>,
        period_id: impl Into<String>,
        sum: i64,
    ) -> std::result::Result<Self, ValidationError> {
        if !(3..=18).contains(&sum) {
            return Err(ValidationError::SumOutOfRange { sum });
        }
        let period_id = period_id.into();
        if !period::is_valid_period_id(&period_id) {
            return Err(ValidationError::MalformedPeriodId { period_id });
        }

        let sum = sum as u8;
        Ok(Self {
            id: RecordId::new(),
            source_id: source_id.into(),
            period_id,
            sum,
            big_small: BigSmall::from_sum(sum),
            parity: Parity::from_sum(sum),
            extracted_at: Utc::now(),
        })
    }

    /// Validate a raw reading from the given image into a record.
    pub fn from_reading(
        source_id: &str,
        reading: RawReading,
    ) -> std::result::Result<Self, ValidationError> {
        Self::new(source_id, reading.period_id, reading.sum)
    }

    /// Stable identifier assigned at creation.
    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Identifier of the originating image.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Digit-string round identifier.
    pub fn period_id(&self) -> &str {
        &self.period_id
    }

    /// The numeric outcome, always in `3..=18`.
    pub fn sum(&self) -> u8 {
        self.sum
    }

    /// Derived Big/Small classification.
    pub fn big_small(&self) -> BigSmall {
        self.big_small
    }

    /// Derived parity classification.
    pub fn parity(&self) -> Parity {
        self.parity
    }

    /// When this record was created.
    pub fn extracted_at(&self) -> DateTime<Utc> {
        self.extracted_at
    }
}

/// Wire form of a record.
///
/// Re-runs the domain checks on the way in and recomputes the
/// derived classifications from `sum`, so stored data can neither
/// smuggle in an out-of-range sum nor a stale classification.
#[derive(Deserialize)]
struct RawRecord {
    id: RecordId,
    source_id: String,
    period_id: String,
    sum: i64,
    extracted_at: DateTime<Utc>,
}

impl TryFrom<RawRecord> for ExtractedResult {
    type Error = ValidationError;

    fn try_from(raw: RawRecord) -> std::result::Result<Self, ValidationError> {
        let mut record = ExtractedResult::new(raw.source_id, raw.period_id, raw.sum)?;
        record.id = raw.id;
        record.extracted_at = raw.extracted_at;
        Ok(record)
    }
}
