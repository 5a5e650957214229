//! Batch driver - runs the extractor over a batch of images.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::error::{ImportError, Result};
use crate::store::ReviewStore;
use crate::traits::{Extractor, ProgressReporter};
use crate::types::{BatchOutcome, ExtractedResult, ImageResource, RawReading};

/// Run the extractor over a batch, staging validated records.
///
/// Items are processed strictly in input order, one at a time, each
/// attempted exactly once. A failed item is logged and counted; the
/// batch always continues to the next item. The reporter sees
/// `(completed, total)` after every item, success or failure.
///
/// Cancellation is cooperative and only observed between items, so a
/// cancelled batch never leaves a half-appended image in staging.
/// Records staged before the cancellation point are preserved.
pub async fn run_batch<E, R>(
    batch: &[ImageResource],
    extractor: &E,
    store: &ReviewStore,
    reporter: &R,
    cancel: &CancellationToken,
) -> Result<BatchOutcome>
where
    E: Extractor,
    R: ProgressReporter,
{
    let total = batch.len();
    let mut outcome = BatchOutcome::new();

    info!(total, extractor = extractor.name(), "starting batch import");
    reporter.on_log(&format!("Processing {total} images"));

    for (completed_before, image) in batch.iter().enumerate() {
        if cancel.is_cancelled() {
            info!(
                completed = completed_before,
                total, "batch cancelled between items"
            );
            return Err(ImportError::Cancelled);
        }

        match extractor.extract(image).await {
            Ok(readings) => {
                let staged = stage_readings(&image.source_id, readings, store, reporter);
                outcome.records_staged += staged;
                outcome.succeeded += 1;
            }
            Err(e) => {
                warn!(source_id = %image.source_id, error = %e, "extraction failed");
                reporter.on_log(&format!("Failed {}: {e}", image.source_id));
                outcome.failed_sources.push(image.source_id.clone());
                outcome.failed += 1;
            }
        }

        reporter.on_progress(completed_before + 1, total);
    }

    info!(
        succeeded = outcome.succeeded,
        failed = outcome.failed,
        records_staged = outcome.records_staged,
        "batch import complete"
    );

    Ok(outcome)
}

/// Validate readings from one image and append the good ones.
///
/// Out-of-range or malformed readings are rejected here, before they
/// can reach staging; the image still counts as succeeded.
fn stage_readings<R: ProgressReporter>(
    source_id: &str,
    readings: Vec<RawReading>,
    store: &ReviewStore,
    reporter: &R,
) -> usize {
    let mut records = Vec::with_capacity(readings.len());
    for reading in readings {
        match ExtractedResult::from_reading(source_id, reading) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(source_id, error = %e, "rejected reading");
                reporter.on_log(&format!("Rejected reading from {source_id}: {e}"));
            }
        }
    }
    let staged = records.len();
    store.append(records);
    staged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::FixtureExtractor;
    use crate::testing::CollectingReporter;
    use crate::types::RawReading;

    fn image(id: &str) -> ImageResource {
        ImageResource::new(id, vec![0u8; 4]).with_content_type("image/png")
    }

    fn readings(base: u32, count: usize) -> Vec<RawReading> {
        (0..count)
            .map(|i| {
                RawReading::new(
                    format!("20240105130200{:03}", base + i as u32),
                    3 + (i as i64 % 16),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_failure_isolation_counts() {
        let extractor = FixtureExtractor::new()
            .with_readings("a", readings(0, 10))
            .fail_source("b")
            .with_readings("c", readings(100, 12));
        let store = ReviewStore::new();
        let reporter = CollectingReporter::new();
        let cancel = CancellationToken::new();

        let batch = [image("a"), image("b"), image("c")];
        let outcome = run_batch(&batch, &extractor, &store, &reporter, &cancel)
            .await
            .unwrap();

        assert_eq!(outcome.succeeded, 2);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.records_staged, 22);
        assert_eq!(outcome.failed_sources, vec!["b".to_string()]);
        assert_eq!(store.len(), 22);
    }

    #[tokio::test]
    async fn test_progress_emitted_in_order_including_failures() {
        let extractor = FixtureExtractor::new()
            .with_readings("a", readings(0, 1))
            .fail_source("b");
        let store = ReviewStore::new();
        let reporter = CollectingReporter::new();
        let cancel = CancellationToken::new();

        let batch = [image("a"), image("b")];
        run_batch(&batch, &extractor, &store, &reporter, &cancel)
            .await
            .unwrap();

        assert_eq!(reporter.progress(), vec![(1, 2), (2, 2)]);
    }

    #[tokio::test]
    async fn test_invalid_readings_rejected_before_staging() {
        let extractor = FixtureExtractor::new().with_readings(
            "a",
            vec![
                RawReading::new("20240105130200001", 10),
                RawReading::new("20240105130200002", 99), // out of range
                RawReading::new("bogus", 10),             // bad period id
            ],
        );
        let store = ReviewStore::new();
        let reporter = CollectingReporter::new();
        let cancel = CancellationToken::new();

        let outcome = run_batch(&[image("a")], &extractor, &store, &reporter, &cancel)
            .await
            .unwrap();

        assert_eq!(outcome.succeeded, 1);
        assert_eq!(outcome.records_staged, 1);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let extractor = FixtureExtractor::new().with_readings("a", readings(0, 1));
        let store = ReviewStore::new();
        let reporter = CollectingReporter::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = run_batch(&[image("a")], &extractor, &store, &reporter, &cancel).await;

        assert!(matches!(result, Err(ImportError::Cancelled)));
        assert!(store.is_empty());
        assert!(extractor.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let extractor = FixtureExtractor::new();
        let store = ReviewStore::new();
        let reporter = CollectingReporter::new();
        let cancel = CancellationToken::new();

        let outcome = run_batch(&[], &extractor, &store, &reporter, &cancel)
            .await
            .unwrap();

        assert!(outcome.is_success());
        assert_eq!(outcome.total(), 0);
        assert!(reporter.progress().is_empty());
    }
}
