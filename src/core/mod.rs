pub mod etl;
pub mod pipeline;
pub mod scheduler;
pub mod transform;

pub use crate::domain::model::{Dataset, Record, RunSummary, TransformedDataset};
pub use crate::domain::ports::{ConfigProvider, Extractor, Pipeline, Storage};
pub use crate::utils::error::Result;
