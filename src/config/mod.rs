pub mod catalog;

use crate::domain::ports::ConfigProvider;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "crisiswatch")]
#[command(about = "Ingests socio-economic crisis indicators from CSV sources")]
pub struct CliConfig {
    /// Base URL or directory the CSV resources are served from.
    #[arg(long, default_value = "./public")]
    pub data_root: String,

    /// TOML file replacing the built-in dataset catalog.
    #[arg(long)]
    pub catalog: Option<String>,

    /// How many geographies the crisis ranking keeps.
    #[arg(long, default_value = "10")]
    pub ranking_cutoff: usize,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn data_root(&self) -> &str {
        &self.data_root
    }

    fn catalog_path(&self) -> Option<&str> {
        self.catalog.as_deref()
    }

    fn ranking_cutoff(&self) -> usize {
        self.ranking_cutoff
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validate_non_empty_string("data_root", &self.data_root)?;
        if self.data_root.starts_with("http://") || self.data_root.starts_with("https://") {
            validate_url("data_root", &self.data_root)?;
        }
        if let Some(catalog) = &self.catalog {
            validate_non_empty_string("catalog", catalog)?;
        }
        validate_positive_number("ranking_cutoff", self.ranking_cutoff, 1)?;
        Ok(())
    }
}
