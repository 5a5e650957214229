//! The Importer - an explicit pipeline instance.
//!
//! Owns one review session's staging collection and the injected
//! extractor and reporter capabilities. Nothing here is reachable
//! through ambient global state; callers construct an importer, run
//! batches, let the user edit the store, then commit into a sink.

use tokio_util::sync::CancellationToken;

use crate::error::Result;
use crate::pipeline::{commit_staged, run_batch, CommitConfig};
use crate::store::ReviewStore;
use crate::traits::{Extractor, HistorySink, ProgressReporter};
use crate::types::{BatchOutcome, CommitOutcome, ImageResource};

/// One bulk-import session: extractor + reporter + staging store.
///
/// # Example
///
/// ```rust,ignore
/// let importer = Importer::new(OcrExtractor::new(engine), TracingReporter);
///
/// let outcome = importer.run(&images).await?;
/// // ... user reviews importer.store() ...
/// let committed = importer.commit(&sink).await?;
/// ```
pub struct Importer<E: Extractor, R: ProgressReporter> {
    extractor: E,
    reporter: R,
    store: ReviewStore,
    commit_config: CommitConfig,
}

impl<E: Extractor, R: ProgressReporter> Importer<E, R> {
    /// Create a new importer with an empty staging collection.
    pub fn new(extractor: E, reporter: R) -> Self {
        Self {
            extractor,
            reporter,
            store: ReviewStore::new(),
            commit_config: CommitConfig::default(),
        }
    }

    /// Create with custom commit configuration.
    pub fn with_commit_config(mut self, config: CommitConfig) -> Self {
        self.commit_config = config;
        self
    }

    /// The staging collection, for review and edits.
    pub fn store(&self) -> &ReviewStore {
        &self.store
    }

    /// Run a batch of images through the extractor into staging.
    pub async fn run(&self, batch: &[ImageResource]) -> Result<BatchOutcome> {
        self.run_with_cancel(batch, &CancellationToken::new()).await
    }

    /// Run a batch with cooperative cancellation between items.
    pub async fn run_with_cancel(
        &self,
        batch: &[ImageResource],
        cancel: &CancellationToken,
    ) -> Result<BatchOutcome> {
        run_batch(batch, &self.extractor, &self.store, &self.reporter, cancel).await
    }

    /// Commit the accepted staging collection into the sink.
    pub async fn commit<K: HistorySink>(&self, sink: &K) -> Result<CommitOutcome> {
        commit_staged(&self.store, sink, &self.reporter, &self.commit_config).await
    }

    /// Cancel the review session, discarding all staged records.
    pub fn discard(&self) {
        self.store.clear();
    }
}
