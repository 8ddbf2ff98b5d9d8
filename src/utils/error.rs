use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Failed to fetch '{resource}': {detail}")]
    Fetch { resource: String, detail: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Input is not tabular text: {detail}")]
    Parse { detail: String },

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No usable records in dataset '{dataset}'")]
    EmptyResult { dataset: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Catalog error: {0}")]
    Catalog(#[from] toml::de::Error),

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },
}

pub type Result<T> = std::result::Result<T, IngestError>;
