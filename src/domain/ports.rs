use crate::domain::model::{Dataset, IntegrityReport, TransformRules, TransformedDataset};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    /// Writes `data` to `path` relative to the storage root, replacing any
    /// existing file. Returns the full path written.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;

    /// Ensures the storage root exists and deletes every file directly
    /// inside it. Returns the number of files removed.
    fn clear(&self) -> impl std::future::Future<Output = Result<usize>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
    fn output_path(&self) -> &str;
    fn temp_path(&self) -> &str;
    fn transform_rules(&self) -> TransformRules;
    fn run_interval(&self) -> Duration;
}

#[async_trait]
pub trait Extractor: Send + Sync {
    fn name(&self) -> &str;
    async fn extract(&self) -> Result<Dataset>;
}

/// The stages of one ETL run. Each stage reports its own failure; the
/// caller decides how failures combine.
#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract_remote(&self) -> Result<Dataset>;
    async fn extract_local(&self) -> Result<Dataset>;
    async fn transform(&self, data: Dataset) -> Result<TransformedDataset>;
    async fn load(&self, data: &TransformedDataset) -> Result<Option<String>>;
    async fn check_integrity(&self, data: &TransformedDataset) -> Result<Option<IntegrityReport>>;
    async fn cleanup(&self) -> Result<usize>;
}
