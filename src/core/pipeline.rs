use crate::config::catalog::DatasetSpec;
use crate::core::{aggregate, coerce, rows};
use crate::domain::model::{NamedSeries, ParsedRecord, SeriesSet};
use crate::domain::ports::Fetcher;
use crate::utils::error::{IngestError, Result};
use std::sync::Arc;

/// Fetch, parse, coerce and (optionally) aggregate one CSV source into a
/// chart-ready series set. Stateless between runs; every call re-fetches.
pub struct DatasetPipeline {
    fetcher: Arc<dyn Fetcher>,
    spec: DatasetSpec,
}

impl DatasetPipeline {
    pub fn new(fetcher: Arc<dyn Fetcher>, spec: DatasetSpec) -> Self {
        Self { fetcher, spec }
    }

    pub fn spec(&self) -> &DatasetSpec {
        &self.spec
    }

    pub async fn run(&self) -> Result<SeriesSet> {
        tracing::debug!("{}: fetching '{}'", self.spec.key, self.spec.resource);
        let text = self.fetcher.fetch_text(&self.spec.resource).await?;

        let raw_rows = rows::parse_rows(&text)?;
        tracing::debug!("{}: parsed {} raw rows", self.spec.key, raw_rows.len());

        let records = coerce::build_records(&raw_rows, &self.spec);
        if records.is_empty() {
            // An empty chart is a failure, not a success with nothing on it.
            return Err(IngestError::EmptyResult {
                dataset: self.spec.key.clone(),
            });
        }

        let set = if self.spec.monthly_mean {
            monthly_series(&records, &self.spec)
        } else {
            direct_series(&records, &self.spec)
        };

        tracing::info!(
            "{}: {} labels across {} series",
            self.spec.key,
            set.labels.len(),
            set.series.len()
        );
        Ok(set)
    }
}

fn direct_series(records: &[ParsedRecord], spec: &DatasetSpec) -> SeriesSet {
    let labels = records.iter().map(|r| r.date).collect();
    let series = spec
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| NamedSeries {
            name: field.name.clone(),
            points: records.iter().map(|r| r.values[i]).collect(),
        })
        .collect();
    SeriesSet { labels, series }
}

fn monthly_series(records: &[ParsedRecord], spec: &DatasetSpec) -> SeriesSet {
    let buckets = aggregate::monthly_means(records, spec.fields.len());
    let labels = buckets.iter().map(|b| b.first_date).collect();
    let series = spec
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| NamedSeries {
            name: field.name.clone(),
            points: buckets.iter().map(|b| b.means[i]).collect(),
        })
        .collect();
    SeriesSet { labels, series }
}
