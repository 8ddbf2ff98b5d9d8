use crate::domain::model::{CrisisReport, GroupSummary, SeriesSet};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Retrieves the raw text of a resource. One attempt per call; retries (if
/// any) belong to the caller.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch_text(&self, resource: &str) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn data_root(&self) -> &str;
    fn catalog_path(&self) -> Option<&str>;
    fn ranking_cutoff(&self) -> usize;
}

/// Display boundary. Sinks receive read-only payloads and own their own
/// presentation state; nothing flows back into the pipeline.
pub trait RenderSink: Send + Sync {
    fn chart(&self, dataset: &str, chart: &SeriesSet);
    fn table(&self, dataset: &str, rows: &[GroupSummary]);
    fn report(&self, dataset: &str, report: &CrisisReport);
}
