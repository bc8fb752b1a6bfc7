use crate::adapters::{ApiExtractor, LocalStorage, StaticExtractor};
use crate::core::transform::{apply_discount, find_missing_values};
use crate::domain::model::{Dataset, IntegrityReport, TransformedDataset};
use crate::domain::ports::{ConfigProvider, Extractor, Pipeline, Storage};
use crate::utils::error::Result;
use chrono::{DateTime, Local};

pub const OUTPUT_FILE_PREFIX: &str = "dados_processados_";

/// `dados_processados_<YYYYMMDD_HHMMSS>.csv`. Two runs in the same second
/// share a name and the later write replaces the earlier file.
pub fn output_file_name(now: &DateTime<Local>) -> String {
    format!("{}{}.csv", OUTPUT_FILE_PREFIX, now.format("%Y%m%d_%H%M%S"))
}

/// Header row plus one line per record, columns in `TransformedRecord` field order.
pub fn to_csv(data: &TransformedDataset) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in data {
        writer.serialize(record)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(bytes)
}

pub struct EtlPipeline<S: Storage, C: ConfigProvider> {
    output: S,
    temp: S,
    config: C,
    remote: Box<dyn Extractor>,
    local: Box<dyn Extractor>,
}

impl<S: Storage, C: ConfigProvider> EtlPipeline<S, C> {
    pub fn new(
        output: S,
        temp: S,
        config: C,
        remote: Box<dyn Extractor>,
        local: Box<dyn Extractor>,
    ) -> Self {
        Self {
            output,
            temp,
            config,
            remote,
            local,
        }
    }
}

impl<C: ConfigProvider> EtlPipeline<LocalStorage, C> {
    /// Wires the HTTP source, the in-memory database rows and local storage
    /// from the configuration.
    pub fn from_config(config: C) -> Result<Self> {
        let remote = ApiExtractor::new(config.api_endpoint(), config.request_timeout())?;
        let output = LocalStorage::new(config.output_path());
        let temp = LocalStorage::new(config.temp_path());

        Ok(Self::new(
            output,
            temp,
            config,
            Box::new(remote),
            Box::new(StaticExtractor::default()),
        ))
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for EtlPipeline<S, C> {
    async fn extract_remote(&self) -> Result<Dataset> {
        tracing::debug!("Extracting from source '{}'", self.remote.name());
        self.remote.extract().await
    }

    async fn extract_local(&self) -> Result<Dataset> {
        tracing::debug!("Extracting from source '{}'", self.local.name());
        self.local.extract().await
    }

    async fn transform(&self, data: Dataset) -> Result<TransformedDataset> {
        tracing::info!("Starting data transformation...");
        if data.is_empty() {
            tracing::warn!("No data available for transformation.");
            return Ok(Vec::new());
        }

        let input_rows = data.len();
        let transformed = apply_discount(data, self.config.transform_rules());

        tracing::info!(
            "Transformation finished: {} of {} rows kept",
            transformed.len(),
            input_rows
        );
        println!("Transformed data: {} rows", transformed.len());
        Ok(transformed)
    }

    async fn load(&self, data: &TransformedDataset) -> Result<Option<String>> {
        if data.is_empty() {
            tracing::warn!("No data to load.");
            return Ok(None);
        }

        let file_name = output_file_name(&Local::now());
        let csv_data = to_csv(data)?;
        tracing::debug!("Writing {} bytes to {}", csv_data.len(), file_name);

        let path = self.output.write_file(&file_name, &csv_data).await?;
        tracing::info!("Data loaded locally into file {}.", path);
        println!("Data saved to file {}.", path);
        Ok(Some(path))
    }

    async fn check_integrity(&self, data: &TransformedDataset) -> Result<Option<IntegrityReport>> {
        if data.is_empty() {
            tracing::warn!("No data to verify.");
            return Ok(None);
        }

        let report = find_missing_values(data);
        if report.has_missing_values() {
            tracing::warn!(
                "Data with missing values found ({} fields across {} rows).",
                report.missing.len(),
                report.rows_checked
            );
            println!("Data with missing values found.");
        } else {
            tracing::info!("Integrity check finished, no missing values.");
            println!("Integrity check finished, no missing values.");
        }
        Ok(Some(report))
    }

    async fn cleanup(&self) -> Result<usize> {
        tracing::info!("Cleaning temporary files...");
        let removed = self.temp.clear().await?;
        tracing::info!("Temporary files cleaned ({} removed).", removed);
        Ok(removed)
    }
}
