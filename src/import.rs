//! The import run: load the export file, normalize, filter, upload.
use anyhow::{Context, Result};
use tokio::fs;
use tracing::info;

use crate::cli::ImportOptions;
use crate::model::RawRecord;
use crate::store::{self, Store};
use crate::{filter, normalize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImportReport {
    pub loaded: usize,
    pub kept: usize,
    pub rejected: usize,
    pub inserted: usize,
    pub total_batches: usize,
    pub failed_batches: usize,
}

/// Execute one full import. Missing file or malformed JSON is fatal;
/// per-batch upload failures are contained and surfaced in the report.
pub async fn run(opts: &ImportOptions, store: &dyn Store) -> Result<ImportReport> {
    let raw = fs::read_to_string(&opts.file_path)
        .await
        .with_context(|| format!("failed to read {}", opts.file_path.display()))?;
    let records: Vec<RawRecord> =
        serde_json::from_str(&raw).context("input is not a JSON array of records")?;

    info!(
        count = records.len(),
        file = %opts.file_path.display(),
        "loaded records"
    );
    info!(
        min_likes = opts.min_likes,
        min_bookmarks = opts.min_bookmarks,
        min_retweets = opts.min_retweets,
        min_replies = opts.min_replies,
        text_only = opts.text_only,
        "filters in effect"
    );

    let loaded = records.len();
    let normalized: Vec<_> = records.iter().map(|r| normalize::normalize(r, opts)).collect();
    let survivors = filter::apply(normalized, opts);
    let kept = survivors.len();

    if survivors.is_empty() {
        info!("nothing to import; try lowering the filter thresholds");
        return Ok(ImportReport {
            loaded,
            rejected: loaded,
            ..Default::default()
        });
    }

    let upload = store::upload_all(store, &survivors, store::BATCH_SIZE).await;
    info!(inserted = upload.inserted, "import complete");

    Ok(ImportReport {
        loaded,
        kept,
        rejected: loaded - kept,
        inserted: upload.inserted,
        total_batches: upload.total_batches,
        failed_batches: upload.failed_batches,
    })
}
