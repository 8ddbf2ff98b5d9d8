pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{FileFetcher, HttpFetcher, JsonSink};
pub use config::{catalog::Catalog, CliConfig};
pub use core::loader::{CancelGuard, LoadSlot, LoadState};
pub use core::pipeline::DatasetPipeline;
pub use utils::error::{IngestError, Result};
