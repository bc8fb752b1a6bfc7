pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::{ApiExtractor, LocalStorage, StaticExtractor};
pub use crate::config::AppConfig;
pub use crate::core::{etl::EtlEngine, pipeline::EtlPipeline, scheduler::Scheduler};
pub use crate::utils::error::{EtlError, Result};
