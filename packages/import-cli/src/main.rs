//! Import preview tool.
//!
//! Runs the bulk-import pipeline over OCR text dumps (one file per
//! screenshot) and prints the staged records and summary without
//! committing anywhere. Useful for checking what a batch of
//! screenshots would import before wiring up a real history store.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bulk_import::{
    period, CommitConfig, ImageResource, Importer, OcrEngine, OcrExtractor, TracingReporter,
};

#[derive(Parser)]
#[command(name = "import-preview")]
#[command(about = "Preview a screenshot bulk import from OCR text dumps")]
struct Args {
    /// Text dump files, one per screenshot
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Drop repeated period ids, keeping the first occurrence
    #[arg(long)]
    dedupe: bool,

    /// Print staged records as JSON instead of a table
    #[arg(long)]
    json: bool,
}

/// Engine that treats the image bytes as already-recognized text.
///
/// Stands in for a real OCR backend when working from saved dumps.
struct TextDumpEngine;

#[async_trait]
impl OcrEngine for TextDumpEngine {
    async fn recognize(
        &self,
        image: &ImageResource,
    ) -> std::result::Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(String::from_utf8(image.data.clone())?)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let args = Args::parse();

    let mut batch = Vec::with_capacity(args.files.len());
    for path in &args.files {
        let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let source_id = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        batch.push(ImageResource::new(source_id, data).with_content_type("text/plain"));
    }

    let extractor = OcrExtractor::new(TextDumpEngine).with_accepted_type("text/plain");
    let mut commit_config = CommitConfig::new();
    if args.dedupe {
        commit_config = commit_config.with_dedupe_periods();
    }
    let importer = Importer::new(extractor, TracingReporter).with_commit_config(commit_config);

    let outcome = importer.run(&batch).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&importer.store().list())?);
        return Ok(());
    }

    println!(
        "Processed {} files: {} succeeded, {} failed, {} records staged",
        outcome.total(),
        outcome.succeeded,
        outcome.failed,
        outcome.records_staged
    );
    for source in &outcome.failed_sources {
        println!("  failed: {source}");
    }

    println!();
    for (i, record) in importer.store().list().iter().enumerate() {
        let period = period::format_period_display(record.period_id())
            .unwrap_or_else(|| record.period_id().to_string());
        println!(
            "{:>4}  {}  sum {:>2}  {:?}/{:?}  ({})",
            i,
            period,
            record.sum(),
            record.big_small(),
            record.parity(),
            record.source_id()
        );
    }

    let summary = importer.store().summary();
    println!();
    println!(
        "Summary: {} total | big {} / small {} | odd {} / even {}",
        summary.total, summary.big, summary.small, summary.odd, summary.even
    );

    Ok(())
}
