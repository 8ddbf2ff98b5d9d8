pub mod aggregate;
pub mod coerce;
pub mod dates;
pub mod loader;
pub mod pipeline;
pub mod rows;

pub use crate::domain::model::{ParsedRecord, RawRow, SeriesSet};
pub use crate::domain::ports::{ConfigProvider, Fetcher, RenderSink};
pub use crate::utils::error::Result;
