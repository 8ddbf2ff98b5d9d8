use crate::domain::model::{CrisisReport, GroupSummary, SeriesSet};
use crate::domain::ports::{Fetcher, RenderSink};
use crate::utils::error::{IngestError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use url::Url;

/// Fetches resources over HTTP relative to a base URL. One attempt, no
/// retries, no timeout.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    base_url: Url,
}

impl HttpFetcher {
    pub fn new(base_url: &str) -> Result<Self> {
        // A base without a trailing slash would swallow its last path segment
        // on join.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized).map_err(|e| IngestError::InvalidConfigValue {
            field: "data_root".to_string(),
            value: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch_text(&self, resource: &str) -> Result<String> {
        let url = self
            .base_url
            .join(resource)
            .map_err(|e| IngestError::Fetch {
                resource: resource.to_string(),
                detail: format!("unresolvable URL: {}", e),
            })?;

        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(IngestError::Fetch {
                resource: resource.to_string(),
                detail: format!("status {}", response.status()),
            });
        }

        Ok(response.text().await?)
    }
}

/// Fetches resources from files under a base directory.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    base_dir: PathBuf,
}

impl FileFetcher {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl Fetcher for FileFetcher {
    async fn fetch_text(&self, resource: &str) -> Result<String> {
        let path = self.base_dir.join(resource);
        tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| IngestError::Fetch {
                resource: resource.to_string(),
                detail: e.to_string(),
            })
    }
}

/// Picks the fetcher from the shape of the data root: HTTP(S) URLs go over
/// the network, everything else is a local directory.
pub fn fetcher_for_root(data_root: &str) -> Result<std::sync::Arc<dyn Fetcher>> {
    if data_root.starts_with("http://") || data_root.starts_with("https://") {
        Ok(std::sync::Arc::new(HttpFetcher::new(data_root)?))
    } else {
        Ok(std::sync::Arc::new(FileFetcher::new(data_root)))
    }
}

/// Render sink that writes one JSON document per payload. The reference sink
/// for headless runs; a real chart frontend implements the same port.
pub struct JsonSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    fn emit<P: Serialize>(&self, dataset: &str, kind: &str, payload: &P) {
        let document = serde_json::json!({
            "dataset": dataset,
            "kind": kind,
            "payload": payload,
        });
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = serde_json::to_writer(&mut *writer, &document)
            .map_err(IngestError::from)
            .and_then(|_| writeln!(writer).map_err(IngestError::from))
        {
            tracing::warn!("{}: sink write failed: {}", dataset, e);
        }
    }
}

impl JsonSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> RenderSink for JsonSink<W> {
    fn chart(&self, dataset: &str, chart: &SeriesSet) {
        self.emit(dataset, "chart", chart);
    }

    fn table(&self, dataset: &str, rows: &[GroupSummary]) {
        self.emit(dataset, "table", &rows);
    }

    fn report(&self, dataset: &str, report: &CrisisReport) {
        self.emit(dataset, "report", report);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[tokio::test]
    async fn test_file_fetcher_reads_resource() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot_3a1.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "date,europe\n2022-01-03,78.2").unwrap();

        let fetcher = FileFetcher::new(dir.path());
        let text = fetcher.fetch_text("plot_3a1.csv").await.unwrap();
        assert!(text.starts_with("date,europe"));
    }

    #[tokio::test]
    async fn test_file_fetcher_missing_resource_is_fetch_error() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FileFetcher::new(dir.path());
        let err = fetcher.fetch_text("nope.csv").await.unwrap_err();
        assert!(matches!(err, IngestError::Fetch { .. }));
    }

    #[test]
    fn test_fetcher_for_root_picks_by_scheme() {
        assert!(fetcher_for_root("https://example.com/data/").is_ok());
        assert!(fetcher_for_root("./public").is_ok());
        assert!(fetcher_for_root("http://not a url").is_err());
    }

    #[test]
    fn test_json_sink_writes_one_document_per_payload() {
        let sink = JsonSink::new(Vec::new());
        let rows = vec![GroupSummary {
            key: "Africa".to_string(),
            count: 3,
            mean: 0.4,
        }];
        sink.table("prediction", &rows);

        let buffer = sink.writer.into_inner().unwrap();
        let line = String::from_utf8(buffer).unwrap();
        let value: serde_json::Value = serde_json::from_str(line.trim()).unwrap();
        assert_eq!(value["dataset"], "prediction");
        assert_eq!(value["kind"], "table");
        assert_eq!(value["payload"][0]["key"], "Africa");
    }
}
