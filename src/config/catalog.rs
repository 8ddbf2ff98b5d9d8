use crate::utils::error::{IngestError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do with a row whose numeric fields all coerced to null.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowPolicy {
    /// Drop the row; a record carrying no signal is noise.
    #[default]
    RequireAnySignal,
    /// Keep the row; sparse sources stay aligned with their dates.
    KeepPartial,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    /// Multiplier applied after coercion (fractional sources are stored
    /// scaled, e.g. inflation rates shipped as 0.083 for 8.3%).
    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_scale() -> f64 {
    1.0
}

impl FieldSpec {
    pub fn plain(name: &str) -> Self {
        Self {
            name: name.to_string(),
            scale: 1.0,
        }
    }

    pub fn scaled(name: &str, scale: f64) -> Self {
        Self {
            name: name.to_string(),
            scale,
        }
    }
}

/// Everything the ingestion pipeline needs to know about one CSV source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSpec {
    pub key: String,
    pub resource: String,
    #[serde(default = "default_date_field")]
    pub date_field: String,
    pub fields: Vec<FieldSpec>,
    #[serde(default)]
    pub policy: RowPolicy,
    /// Collapse records into per-month means instead of charting every row.
    #[serde(default)]
    pub monthly_mean: bool,
}

fn default_date_field() -> String {
    "date".to_string()
}

impl DatasetSpec {
    pub fn new(key: &str, resource: &str, fields: Vec<FieldSpec>) -> Self {
        Self {
            key: key.to_string(),
            resource: resource.to_string(),
            date_field: default_date_field(),
            fields,
            policy: RowPolicy::default(),
            monthly_mean: false,
        }
    }

    pub fn with_policy(mut self, policy: RowPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_monthly_mean(mut self) -> Self {
        self.monthly_mean = true;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionSpec {
    pub resource: String,
}

/// The full set of sources one run ingests. A TOML file can replace the
/// compiled-in catalog wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub datasets: Vec<DatasetSpec>,
    pub prediction: PredictionSpec,
}

impl Catalog {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog: Catalog = toml::from_str(&content)?;
        catalog.validate()?;
        Ok(catalog)
    }
}

impl Validate for Catalog {
    fn validate(&self) -> Result<()> {
        if self.datasets.is_empty() {
            return Err(IngestError::MissingConfig {
                field: "datasets".to_string(),
            });
        }
        for dataset in &self.datasets {
            validate_non_empty_string("datasets.key", &dataset.key)?;
            validate_non_empty_string("datasets.resource", &dataset.resource)?;
            validate_non_empty_string("datasets.date_field", &dataset.date_field)?;
            if dataset.fields.is_empty() {
                return Err(IngestError::InvalidConfigValue {
                    field: "datasets.fields".to_string(),
                    value: dataset.key.clone(),
                    reason: "dataset declares no numeric fields".to_string(),
                });
            }
        }
        validate_non_empty_string("prediction.resource", &self.prediction.resource)
    }
}
