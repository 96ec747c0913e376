use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::fmt;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::model::NormalizedRecord;

/// Records per bulk-insert request.
pub const BATCH_SIZE: usize = 500;

/// One bulk-insert call against the remote store. Mocked in tests.
#[async_trait]
pub trait Store: Send + Sync {
    async fn insert_batch(&self, records: &[NormalizedRecord]) -> Result<()>;
}

/// REST client for the store's bulk-insert endpoint
/// (`POST <base>/rest/v1/<table>`).
#[derive(Clone)]
pub struct RestStore {
    http: Client,
    base_url: Url,
    api_key: String,
    table: String,
}

impl fmt::Debug for RestStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestStore")
            .field("base_url", &self.base_url)
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl RestStore {
    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.base_url.clone(), cfg.api_key.clone(), cfg.table.clone())
    }

    pub fn new(base_url: Url, api_key: String, table: String) -> Self {
        let http = Client::builder()
            .user_agent("swipefile-import/0.1")
            .no_proxy()
            .build()
            .expect("reqwest client");
        Self {
            http,
            base_url,
            api_key,
            table,
        }
    }

    pub fn build_request(&self, records: &[NormalizedRecord]) -> Result<reqwest::Request> {
        let endpoint = self
            .base_url
            .join(&format!("rest/v1/{}", self.table))
            .context("invalid store base URL")?;
        self.http
            .post(endpoint)
            .header("Content-Type", "application/json")
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Prefer", "return=minimal")
            .json(records)
            .build()
            .context("failed to build store request")
    }
}

#[async_trait]
impl Store for RestStore {
    async fn insert_batch(&self, records: &[NormalizedRecord]) -> Result<()> {
        let request = self.build_request(records)?;
        let res = self
            .http
            .execute(request)
            .await
            .context("failed to reach store")?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            warn!(%status, "store insert failed: {}", body);
            return Err(anyhow!("store error {}: {}", status, body));
        }
        Ok(())
    }
}

/// Outcome of submitting every batch of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UploadReport {
    pub inserted: usize,
    pub total_batches: usize,
    pub failed_batches: usize,
}

/// Submit `records` in contiguous, order-preserving batches, one awaited
/// request at a time. A failed batch is logged and skipped; it is never
/// retried, split, or reordered, and later batches still run.
pub async fn upload_all(
    store: &dyn Store,
    records: &[NormalizedRecord],
    batch_size: usize,
) -> UploadReport {
    let mut report = UploadReport::default();
    if records.is_empty() {
        return report;
    }

    let total = records.len();
    for (idx, batch) in records.chunks(batch_size).enumerate() {
        report.total_batches += 1;
        match store.insert_batch(batch).await {
            Ok(()) => {
                report.inserted += batch.len();
                info!(
                    batch = idx + 1,
                    inserted = report.inserted,
                    total,
                    "inserted batch"
                );
            }
            Err(err) => {
                report.failed_batches += 1;
                error!(?err, batch = idx + 1, size = batch.len(), "batch insert failed");
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentType;

    fn sample_store() -> RestStore {
        RestStore::new(
            Url::parse("https://store.example.com").unwrap(),
            "secret-key".into(),
            "tw_swipefile".into(),
        )
    }

    fn sample_record() -> NormalizedRecord {
        NormalizedRecord {
            username: "someone".into(),
            content: "hello".into(),
            likes: 1,
            replies: 0,
            retweets: 0,
            views: 0,
            bookmarks: 0,
            content_type: ContentType::Original,
            notes: None,
        }
    }

    #[test]
    fn build_request_targets_table_resource() {
        let request = sample_store().build_request(&[sample_record()]).unwrap();
        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(request.url().path(), "/rest/v1/tw_swipefile");
    }

    #[test]
    fn build_request_sets_headers() {
        let request = sample_store().build_request(&[sample_record()]).unwrap();
        let headers = request.headers();
        assert_eq!(
            headers.get("Content-Type").and_then(|h| h.to_str().ok()),
            Some("application/json")
        );
        assert_eq!(
            headers.get("apikey").and_then(|h| h.to_str().ok()),
            Some("secret-key")
        );
        assert_eq!(
            headers.get("Authorization").and_then(|h| h.to_str().ok()),
            Some("Bearer secret-key")
        );
        assert_eq!(
            headers.get("Prefer").and_then(|h| h.to_str().ok()),
            Some("return=minimal")
        );
    }

    #[test]
    fn build_request_body_is_json_array() {
        let request = sample_store().build_request(&[sample_record()]).unwrap();
        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert!(parsed.is_array());
        assert_eq!(parsed[0]["username"], "someone");
        assert_eq!(parsed[0]["content_type"], "original");
    }
}
