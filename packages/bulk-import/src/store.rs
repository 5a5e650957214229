//! The review store - the mutable staging collection.

use indexmap::IndexMap;
use std::sync::RwLock;

use crate::error::ReviewError;
use crate::types::{BigSmall, ExtractedResult, Parity, RecordId, StagingSummary};

/// Ordered, mutable staging collection scoped to one review session.
///
/// Created empty when a batch starts, appended to by the batch
/// driver, edited by deletions during review, and cleared on commit
/// or discard. Records keep arrival order and are addressable both
/// by position and by their stable id. Single-writer by design; the
/// lock only makes sharing across await points safe.
pub struct ReviewStore {
    records: RwLock<IndexMap<RecordId, ExtractedResult>>,
}

impl Default for ReviewStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(IndexMap::new()),
        }
    }

    /// Append records to the end, preserving arrival order.
    pub fn append(&self, records: impl IntoIterator<Item = ExtractedResult>) {
        let mut staged = self.records.write().unwrap();
        for record in records {
            staged.insert(record.id(), record);
        }
    }

    /// Snapshot of the current ordered sequence.
    pub fn list(&self) -> Vec<ExtractedResult> {
        self.records.read().unwrap().values().cloned().collect()
    }

    /// Look up a record by id.
    pub fn get(&self, id: RecordId) -> Option<ExtractedResult> {
        self.records.read().unwrap().get(&id).cloned()
    }

    /// Remove the record with the given id.
    ///
    /// Preferred over `remove_at`: ids never shift under earlier
    /// deletions.
    pub fn remove(&self, id: RecordId) -> Result<ExtractedResult, ReviewError> {
        self.records
            .write()
            .unwrap()
            .shift_remove(&id)
            .ok_or(ReviewError::UnknownRecord { id })
    }

    /// Remove the record at `position`, shifting later records down.
    pub fn remove_at(&self, position: usize) -> Result<ExtractedResult, ReviewError> {
        let mut staged = self.records.write().unwrap();
        let len = staged.len();
        staged
            .shift_remove_index(position)
            .map(|(_, record)| record)
            .ok_or(ReviewError::IndexOutOfRange {
                index: position,
                len,
            })
    }

    /// Counts partitioned by the derived classifications.
    pub fn summary(&self) -> StagingSummary {
        let staged = self.records.read().unwrap();
        let mut summary = StagingSummary {
            total: staged.len(),
            ..Default::default()
        };
        for record in staged.values() {
            match record.big_small() {
                BigSmall::Big => summary.big += 1,
                BigSmall::Small => summary.small += 1,
            }
            match record.parity() {
                Parity::Odd => summary.odd += 1,
                Parity::Even => summary.even += 1,
            }
        }
        summary
    }

    /// Number of staged records.
    pub fn len(&self) -> usize {
        self.records.read().unwrap().len()
    }

    /// Check whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.records.read().unwrap().is_empty()
    }

    /// Discard all staged records.
    pub fn clear(&self) {
        self.records.write().unwrap().clear();
    }
}
