use crate::domain::model::{RunSummary, Stage};
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

/// Runs every pipeline stage once, in order. Stage failures are logged,
/// recorded in the summary, and replaced by an empty result.
pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> RunSummary {
        tracing::info!("Starting ETL pipeline.");
        println!("Starting ETL pipeline...");

        let mut summary = RunSummary::default();

        let remote = settle(
            Stage::RemoteExtract,
            self.pipeline.extract_remote().await,
            &mut summary,
        );
        let local = settle(
            Stage::LocalExtract,
            self.pipeline.extract_local().await,
            &mut summary,
        );
        summary.remote_records = remote.len();
        summary.local_records = local.len();

        let mut merged = remote;
        merged.extend(local);
        summary.merged_records = merged.len();
        tracing::debug!("Merged dataset has {} rows", merged.len());

        let transformed = settle(
            Stage::Transform,
            self.pipeline.transform(merged).await,
            &mut summary,
        );
        summary.transformed_records = transformed.len();

        if !transformed.is_empty() {
            let output_file = settle(
                Stage::Load,
                self.pipeline.load(&transformed).await,
                &mut summary,
            );
            summary.output_file = output_file;

            let integrity = settle(
                Stage::IntegrityCheck,
                self.pipeline.check_integrity(&transformed).await,
                &mut summary,
            );
            summary.integrity = integrity;
        }

        let cleaned_files = settle(Stage::Cleanup, self.pipeline.cleanup().await, &mut summary);
        summary.cleaned_files = cleaned_files;

        if summary.failed_stages.is_empty() {
            tracing::info!("ETL pipeline finished.");
        } else {
            tracing::warn!(
                "ETL pipeline finished with {} failed stage(s)",
                summary.failed_stages.len()
            );
        }
        summary
    }
}

fn settle<T: Default>(stage: Stage, result: Result<T>, summary: &mut RunSummary) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            tracing::error!("Error during {} ({:?}): {}", stage, e.category(), e);
            println!("Error during {}: {}", stage, e.user_friendly_message());
            summary.failed_stages.push(stage);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transform::{apply_discount, find_missing_values};
    use crate::domain::model::{Dataset, IntegrityReport, Record, TransformRules, TransformedDataset};
    use crate::utils::error::EtlError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct Calls {
        load: AtomicUsize,
        integrity: AtomicUsize,
        cleanup: AtomicUsize,
    }

    struct ScriptedPipeline {
        remote: Option<Dataset>,
        local: Option<Dataset>,
        fail_transform: bool,
        fail_load: bool,
        calls: Arc<Calls>,
    }

    impl ScriptedPipeline {
        fn new(remote: Option<Dataset>, local: Option<Dataset>) -> Self {
            Self {
                remote,
                local,
                fail_transform: false,
                fail_load: false,
                calls: Arc::new(Calls::default()),
            }
        }
    }

    fn failure() -> EtlError {
        EtlError::ProcessingError {
            message: "scripted failure".to_string(),
        }
    }

    #[async_trait]
    impl Pipeline for ScriptedPipeline {
        async fn extract_remote(&self) -> Result<Dataset> {
            self.remote.clone().ok_or_else(failure)
        }

        async fn extract_local(&self) -> Result<Dataset> {
            self.local.clone().ok_or_else(failure)
        }

        async fn transform(&self, data: Dataset) -> Result<TransformedDataset> {
            if self.fail_transform {
                return Err(failure());
            }
            Ok(apply_discount(data, TransformRules::default()))
        }

        async fn load(&self, _data: &TransformedDataset) -> Result<Option<String>> {
            self.calls.load.fetch_add(1, Ordering::SeqCst);
            if self.fail_load {
                return Err(failure());
            }
            Ok(Some("dados_processados_test.csv".to_string()))
        }

        async fn check_integrity(
            &self,
            data: &TransformedDataset,
        ) -> Result<Option<IntegrityReport>> {
            self.calls.integrity.fetch_add(1, Ordering::SeqCst);
            Ok(Some(find_missing_values(data)))
        }

        async fn cleanup(&self) -> Result<usize> {
            self.calls.cleanup.fetch_add(1, Ordering::SeqCst);
            Ok(0)
        }
    }

    fn local_rows() -> Dataset {
        vec![
            Record::new(1, 120.0, "2025-01-15"),
            Record::new(2, 50.0, "2025-01-16"),
            Record::new(3, 300.0, "2025-01-17"),
        ]
    }

    #[tokio::test]
    async fn test_remote_failure_falls_back_to_local_rows() {
        let pipeline = ScriptedPipeline::new(None, Some(local_rows()));
        let calls = pipeline.calls.clone();

        let summary = EtlEngine::new(pipeline).run().await;

        assert_eq!(summary.failed_stages, vec![Stage::RemoteExtract]);
        assert_eq!(summary.remote_records, 0);
        assert_eq!(summary.merged_records, 3);
        assert_eq!(summary.transformed_records, 2);
        assert_eq!(summary.output_file.as_deref(), Some("dados_processados_test.csv"));
        assert!(!summary.integrity.unwrap().has_missing_values());
        assert_eq!(calls.cleanup.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_merge_keeps_remote_rows_first_without_dedup() {
        let remote = vec![Record::new(1, 500.0, "2025-02-01")];
        let pipeline = ScriptedPipeline::new(Some(remote), Some(local_rows()));

        let summary = EtlEngine::new(pipeline).run().await;

        assert!(summary.failed_stages.is_empty());
        assert_eq!(summary.merged_records, 4);
        assert_eq!(summary.transformed_records, 3);
    }

    #[tokio::test]
    async fn test_empty_transform_skips_load_and_integrity_but_cleans_up() {
        let pipeline = ScriptedPipeline::new(
            Some(Vec::new()),
            Some(vec![Record::new(2, 50.0, "2025-01-16")]),
        );
        let calls = pipeline.calls.clone();

        let summary = EtlEngine::new(pipeline).run().await;

        assert_eq!(summary.transformed_records, 0);
        assert!(summary.output_file.is_none());
        assert!(summary.integrity.is_none());
        assert_eq!(calls.load.load(Ordering::SeqCst), 0);
        assert_eq!(calls.integrity.load(Ordering::SeqCst), 0);
        assert_eq!(calls.cleanup.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_every_source_failing_still_cleans_up() {
        let mut pipeline = ScriptedPipeline::new(None, None);
        pipeline.fail_transform = true;
        let calls = pipeline.calls.clone();

        let summary = EtlEngine::new(pipeline).run().await;

        assert!(summary.failed(Stage::RemoteExtract));
        assert!(summary.failed(Stage::LocalExtract));
        assert!(summary.failed(Stage::Transform));
        assert_eq!(calls.cleanup.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_load_failure_does_not_stop_integrity_check() {
        let mut pipeline = ScriptedPipeline::new(None, Some(local_rows()));
        pipeline.fail_load = true;
        let calls = pipeline.calls.clone();

        let summary = EtlEngine::new(pipeline).run().await;

        assert!(summary.failed(Stage::Load));
        assert!(summary.output_file.is_none());
        assert!(summary.integrity.is_some());
        assert_eq!(calls.integrity.load(Ordering::SeqCst), 1);
        assert_eq!(calls.cleanup.load(Ordering::SeqCst), 1);
    }
}
