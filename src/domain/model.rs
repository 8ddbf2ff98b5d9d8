use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One line of a delimited-text source, keyed by header name. Ragged rows
/// simply lack the trailing keys.
pub type RawRow = HashMap<String, String>;

/// A row after date normalization and field coercion. `values` is aligned
/// index-for-index with the owning dataset's field list; a `None` entry is a
/// missing, "NA" or non-numeric input.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    pub date: NaiveDate,
    pub values: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSeries {
    pub name: String,
    pub points: Vec<Option<f64>>,
}

/// Chart-ready payload: ordered labels plus one series per metric, all the
/// same length and aligned by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSet {
    pub labels: Vec<NaiveDate>,
    pub series: Vec<NamedSeries>,
}

impl SeriesSet {
    pub fn is_aligned(&self) -> bool {
        self.series.iter().all(|s| s.points.len() == self.labels.len())
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Ranked summary of records sharing one categorical key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub key: String,
    pub count: usize,
    pub mean: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

/// One cleaned row of the crisis-prediction source. Categorical fields fall
/// back to placeholder labels rather than dropping the row; only an
/// unparseable date drops it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisRecord {
    pub date: NaiveDate,
    pub geography: String,
    pub countries: String,
    pub development_status: String,
    pub developing_region: String,
    pub crisis_probability: f64,
    pub crisis_predicted: i64,
    pub crisis_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeographyRank {
    pub geography: String,
    pub countries: String,
    pub count: usize,
    pub mean_probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    /// Year-month label, zero-padded (`2025-01`), so lexicographic order is
    /// chronological order.
    pub month: String,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeographyTimeline {
    pub geography: String,
    pub countries: String,
    pub points: Vec<TimelinePoint>,
}

/// Aggregated crisis-prediction views: ranked geographies, development-status
/// distribution, per-region summary table and per-geography timelines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisReport {
    pub top_geographies: Vec<GeographyRank>,
    pub status_distribution: Vec<CategoryCount>,
    pub regional_summary: Vec<GroupSummary>,
    pub probability_timeline: Vec<GeographyTimeline>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
}
