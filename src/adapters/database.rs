use crate::domain::model::{Dataset, Record};
use crate::domain::ports::Extractor;
use crate::utils::error::Result;
use async_trait::async_trait;

/// In-memory stand-in for the database read.
#[derive(Debug, Clone)]
pub struct StaticExtractor {
    rows: Dataset,
}

impl StaticExtractor {
    pub fn new(rows: Dataset) -> Self {
        Self { rows }
    }
}

impl Default for StaticExtractor {
    fn default() -> Self {
        Self::new(vec![
            Record::new(1, 120.0, "2025-01-15"),
            Record::new(2, 50.0, "2025-01-16"),
            Record::new(3, 300.0, "2025-01-17"),
        ])
    }
}

#[async_trait]
impl Extractor for StaticExtractor {
    fn name(&self) -> &str {
        "database"
    }

    async fn extract(&self) -> Result<Dataset> {
        tracing::info!("Trying to extract data from the database...");
        let rows = self.rows.clone();
        tracing::info!("Extracted {} records from the database", rows.len());
        println!("Data extracted from the database: {} records", rows.len());
        Ok(rows)
    }
}
