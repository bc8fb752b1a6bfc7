use crate::domain::model::{Dataset, Record};
use crate::domain::ports::Extractor;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Pulls records from a JSON HTTP endpoint with a single GET.
pub struct ApiExtractor {
    client: Client,
    endpoint: String,
}

impl ApiExtractor {
    /// Without a timeout the request waits as long as the connection stays open.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: endpoint.into(),
        })
    }
}

/// Accepts either an array of row objects or a single row object.
pub fn decode_records(body: serde_json::Value) -> Result<Dataset> {
    match body {
        serde_json::Value::Array(items) => {
            let records: Vec<Record> = serde_json::from_value(serde_json::Value::Array(items))?;
            Ok(records)
        }
        serde_json::Value::Object(obj) => {
            let record: Record = serde_json::from_value(serde_json::Value::Object(obj))?;
            Ok(vec![record])
        }
        other => Err(EtlError::ProcessingError {
            message: format!("expected a JSON array or object, got: {}", other),
        }),
    }
}

#[async_trait]
impl Extractor for ApiExtractor {
    fn name(&self) -> &str {
        "api"
    }

    async fn extract(&self) -> Result<Dataset> {
        tracing::info!("Trying to extract data from the API at {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await?
            .error_for_status()?;
        tracing::debug!("API response status: {}", response.status());

        let bytes = response.bytes().await?;
        let body: serde_json::Value = serde_json::from_slice(&bytes)?;
        let records = decode_records(body)?;

        tracing::info!("Extracted {} records from the API", records.len());
        println!("Data extracted from the API: {} records", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_extract_array_response() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/dados");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!([
                    {"id": 10, "valor": 250.5, "data": "2025-03-01"},
                    {"id": 11, "value": 99, "date": "2025-03-02"}
                ]));
        });

        let extractor = ApiExtractor::new(server.url("/dados"), None).unwrap();
        let records = extractor.extract().await.unwrap();

        api_mock.assert();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], Record::new(10, 250.5, "2025-03-01"));
        assert_eq!(records[1].valor, Some(99.0));
    }

    #[tokio::test]
    async fn test_extract_single_object_response() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/dados");
            then.status(200)
                .json_body(serde_json::json!({"id": 1, "valor": 500}));
        });

        let extractor = ApiExtractor::new(server.url("/dados"), None).unwrap();
        let records = extractor.extract().await.unwrap();

        api_mock.assert();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].data, None);
    }

    #[tokio::test]
    async fn test_extract_server_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/dados");
            then.status(500);
        });

        let extractor = ApiExtractor::new(server.url("/dados"), None).unwrap();
        let err = extractor.extract().await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, EtlError::ApiError(_)));
    }

    #[tokio::test]
    async fn test_extract_malformed_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/dados");
            then.status(200).body("not json");
        });

        let extractor = ApiExtractor::new(server.url("/dados"), None).unwrap();
        let err = extractor.extract().await.unwrap_err();
        assert!(matches!(err, EtlError::SerializationError(_)));
    }

    #[test]
    fn test_decode_records_rejects_scalars() {
        assert!(decode_records(serde_json::json!(42)).is_err());
        assert!(decode_records(serde_json::json!([])).unwrap().is_empty());
    }
}
