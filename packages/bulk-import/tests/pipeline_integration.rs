//! Integration tests for the full import flow.
//!
//! These tests verify the whole session:
//! 1. Run a batch through an extractor into staging
//! 2. Review and edit the staged records
//! 3. Commit into a history sink
//! 4. Check aggregate outcomes and sink call order

use proptest::prelude::*;
use tokio_util::sync::CancellationToken;

use bulk_import::{
    BigSmall, CollectingReporter, CommitConfig, FixtureExtractor, ImageResource, ImportError,
    Importer, Parity, RawReading, RecordingSink, SinkCall,
};

/// Helper to build an image resource for a source id.
fn image(source_id: &str) -> ImageResource {
    ImageResource::new(source_id, vec![0u8; 16]).with_content_type("image/png")
}

/// Helper to build `count` valid readings with distinct periods.
fn readings(base_run: u32, count: usize) -> Vec<RawReading> {
    (0..count)
        .map(|i| {
            RawReading::new(
                format!("20240105130200{:03}", base_run + i as u32),
                3 + (i as i64 % 16),
            )
        })
        .collect()
}

#[tokio::test]
async fn test_batch_with_one_failing_image() {
    let extractor = FixtureExtractor::new()
        .with_readings("a.png", readings(0, 10))
        .fail_source("b.png")
        .with_readings("c.png", readings(100, 12));
    let importer = Importer::new(extractor, CollectingReporter::new());

    let outcome = importer
        .run(&[image("a.png"), image("b.png"), image("c.png")])
        .await
        .unwrap();

    assert_eq!(outcome.succeeded, 2);
    assert_eq!(outcome.failed, 1);
    assert_eq!(outcome.records_staged, 22);
    assert_eq!(importer.store().len(), 22);
    assert!(!outcome.is_success());
}

#[tokio::test]
async fn test_full_session_review_then_commit() {
    let extractor = FixtureExtractor::new().with_readings(
        "table.png",
        vec![
            RawReading::new("20240105130200001", 5),
            RawReading::new("20240105130200002", 14),
            RawReading::new("20240105130200003", 18),
        ],
    );
    let importer = Importer::new(extractor, CollectingReporter::new());
    importer.run(&[image("table.png")]).await.unwrap();

    // Review: a misread row gets deleted by id
    let bad = importer.store().list()[2].id();
    importer.store().remove(bad).unwrap();

    let summary = importer.store().summary();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.big, 1);
    assert_eq!(summary.small, 1);

    // Commit: appends follow staging order exactly
    let sink = RecordingSink::new();
    let outcome = importer.commit(&sink).await.unwrap();

    assert_eq!(outcome.imported, 2);
    assert_eq!(
        sink.calls(),
        vec![
            SinkCall::append("20240105130200001", 5),
            SinkCall::append("20240105130200002", 14),
        ]
    );
    assert!(importer.store().list().is_empty());
}

#[tokio::test]
async fn test_commit_against_unavailable_sink() {
    let extractor = FixtureExtractor::new()
        .with_readings("a.png", vec![RawReading::new("20240105130200001", 5)]);
    let importer = Importer::new(extractor, CollectingReporter::new());
    importer.run(&[image("a.png")]).await.unwrap();

    let sink = RecordingSink::unavailable();
    let result = importer.commit(&sink).await;

    assert!(matches!(result, Err(ImportError::SinkUnavailable)));
    assert!(sink.calls().is_empty());
    // Staging untouched; a later commit into a ready sink still works
    assert_eq!(importer.store().len(), 1);

    let sink = RecordingSink::new();
    assert_eq!(importer.commit(&sink).await.unwrap().imported, 1);
}

#[tokio::test]
async fn test_partial_commit_failures_are_collected() {
    let extractor = FixtureExtractor::new().with_readings(
        "a.png",
        vec![
            RawReading::new("20240105130200001", 5),
            RawReading::new("20240105130200002", 14),
        ],
    );
    let importer = Importer::new(extractor, CollectingReporter::new());
    importer.run(&[image("a.png")]).await.unwrap();

    let sink = RecordingSink::new().fail_period("20240105130200001");
    let outcome = importer.commit(&sink).await.unwrap();

    assert_eq!(outcome.imported, 1);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].record.period_id(), "20240105130200001");
    // Postcondition holds despite the failure
    assert!(importer.store().is_empty());
}

#[tokio::test]
async fn test_cancellation_preserves_staged_records() {
    let extractor = FixtureExtractor::new()
        .with_readings("a.png", vec![RawReading::new("20240105130200001", 5)])
        .with_readings("b.png", vec![RawReading::new("20240105130200002", 9)]);
    let importer = Importer::new(extractor, CollectingReporter::new());

    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = importer
        .run_with_cancel(&[image("a.png"), image("b.png")], &cancel)
        .await;

    assert!(matches!(result, Err(ImportError::Cancelled)));
    // Nothing was half-appended
    assert!(importer.store().is_empty());
}

#[tokio::test]
async fn test_dedupe_config_flows_through_importer() {
    let extractor = FixtureExtractor::new().with_readings(
        "a.png",
        vec![
            RawReading::new("20240105130200001", 5),
            RawReading::new("20240105130200001", 14),
        ],
    );
    let importer = Importer::new(extractor, CollectingReporter::new())
        .with_commit_config(CommitConfig::new().with_dedupe_periods());
    importer.run(&[image("a.png")]).await.unwrap();

    let sink = RecordingSink::new();
    let outcome = importer.commit(&sink).await.unwrap();

    assert_eq!(outcome.imported, 1);
    assert_eq!(sink.history(), vec![("20240105130200001".to_string(), 5)]);
}

proptest! {
    #[test]
    fn prop_classifications_match_thresholds(sum in 3i64..=18) {
        let record = bulk_import::ExtractedResult::new("img", "20240105130200001", sum).unwrap();

        let expect_big = sum >= 11;
        prop_assert_eq!(record.big_small() == BigSmall::Big, expect_big);

        let expect_even = sum % 2 == 0;
        prop_assert_eq!(record.parity() == Parity::Even, expect_even);
    }

    #[test]
    fn prop_out_of_range_sums_rejected(sum in prop_oneof![i64::MIN..3, 19..i64::MAX]) {
        prop_assert!(bulk_import::ExtractedResult::new("img", "20240105130200001", sum).is_err());
    }
}
