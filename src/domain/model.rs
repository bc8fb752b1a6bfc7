use serde::{Deserialize, Serialize};
use std::fmt;

/// A source row. Any field may be absent in data coming from the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: Option<i64>,
    #[serde(alias = "value")]
    pub valor: Option<f64>,
    #[serde(alias = "date")]
    pub data: Option<String>,
}

impl Record {
    pub fn new(id: i64, valor: f64, data: &str) -> Self {
        Self {
            id: Some(id),
            valor: Some(valor),
            data: Some(data.to_string()),
        }
    }
}

/// A row that passed the value filter, with the derived discount column.
/// Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransformedRecord {
    pub id: Option<i64>,
    pub valor: f64,
    pub data: Option<String>,
    pub valor_com_desconto: f64,
}

pub type Dataset = Vec<Record>;
pub type TransformedDataset = Vec<TransformedRecord>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformRules {
    /// Rows with `valor` strictly greater than this survive.
    pub min_value: f64,
    pub discount_factor: f64,
}

impl Default for TransformRules {
    fn default() -> Self {
        Self {
            min_value: 100.0,
            discount_factor: 0.9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingValue {
    pub row: usize,
    pub field: &'static str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntegrityReport {
    pub rows_checked: usize,
    pub missing: Vec<MissingValue>,
}

impl IntegrityReport {
    pub fn has_missing_values(&self) -> bool {
        !self.missing.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    RemoteExtract,
    LocalExtract,
    Transform,
    Load,
    IntegrityCheck,
    Cleanup,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::RemoteExtract => "remote extract",
            Stage::LocalExtract => "local extract",
            Stage::Transform => "transform",
            Stage::Load => "load",
            Stage::IntegrityCheck => "integrity check",
            Stage::Cleanup => "cleanup",
        };
        f.write_str(name)
    }
}

/// Outcome of one pipeline invocation.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub remote_records: usize,
    pub local_records: usize,
    pub merged_records: usize,
    pub transformed_records: usize,
    pub output_file: Option<String>,
    pub integrity: Option<IntegrityReport>,
    pub cleaned_files: usize,
    pub failed_stages: Vec<Stage>,
}

impl RunSummary {
    pub fn failed(&self, stage: Stage) -> bool {
        self.failed_stages.contains(&stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accepts_english_aliases() {
        let record: Record =
            serde_json::from_value(serde_json::json!({"id": 7, "value": 150, "date": "2025-02-01"}))
                .unwrap();
        assert_eq!(record, Record::new(7, 150.0, "2025-02-01"));
    }

    #[test]
    fn test_record_rejects_both_spellings_of_a_field() {
        let result: std::result::Result<Record, _> = serde_json::from_value(
            serde_json::json!({"id": 1, "valor": 150, "value": 150, "data": "2025-02-01"}),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_record_missing_fields_are_none() {
        let record: Record =
            serde_json::from_value(serde_json::json!({"id": 1, "valor": null, "extra": true}))
                .unwrap();
        assert_eq!(record.id, Some(1));
        assert_eq!(record.valor, None);
        assert_eq!(record.data, None);
    }
}
