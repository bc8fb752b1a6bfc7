use crate::config::toml_config::AppConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "periodic-etl")]
#[command(about = "Runs the API + database ETL pipeline on a fixed schedule")]
pub struct CliConfig {
    /// Path to a TOML configuration file; the built-in defaults are used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run the pipeline a single time and exit
    #[arg(long)]
    pub once: bool,

    /// Enable debug logging and console log output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliConfig {
    pub fn load_config(&self) -> Result<AppConfig> {
        match &self.config {
            Some(path) => AppConfig::from_file(path),
            None => Ok(AppConfig::default()),
        }
    }
}
