//! Ordered predicate chain over normalized records. Filtering is stable:
//! survivors keep their original relative order.
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::info;

use crate::cli::ImportOptions;
use crate::model::NormalizedRecord;

static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+").expect("valid URL regex"));

/// Apply the full chain in its fixed order and report counts.
/// Thresholds are inclusive; each defaults to 0 and is then a no-op.
pub fn apply(records: Vec<NormalizedRecord>, opts: &ImportOptions) -> Vec<NormalizedRecord> {
    let input = records.len();
    let survivors: Vec<NormalizedRecord> = records
        .into_iter()
        .filter(|r| !r.content.is_empty())
        .filter(|r| passes_text_only(r, opts))
        .filter(|r| r.likes >= opts.min_likes)
        .filter(|r| r.bookmarks >= opts.min_bookmarks)
        .filter(|r| r.retweets >= opts.min_retweets)
        .filter(|r| r.replies >= opts.min_replies)
        .collect();
    info!(
        input,
        kept = survivors.len(),
        rejected = input - survivors.len(),
        "filter chain complete"
    );
    survivors
}

/// With text-only active, a record survives only if something remains of
/// its content once embedded http(s) links are stripped. Removes posts
/// whose entire body is a single bare link.
fn passes_text_only(record: &NormalizedRecord, opts: &ImportOptions) -> bool {
    if !opts.text_only {
        return true;
    }
    !URL_RE.replace_all(&record.content, "").trim().is_empty()
}
