use crate::core::Pipeline;
use crate::domain::model::{EtlReport, TransformResult};
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub fn run(&self) -> Result<EtlReport> {
        tracing::info!("Starting ETL process...");

        let transformed = self.preview()?;
        let records_processed = transformed.row_count();

        tracing::info!("Loading data...");
        let output_path = self.pipeline.load(transformed)?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(EtlReport {
            output_path,
            records_processed,
        })
    }

    /// Runs extract and transform only; nothing is written.
    pub fn preview(&self) -> Result<TransformResult> {
        tracing::info!("Extracting data...");
        let raw_data = self.pipeline.extract()?;
        let extracted = raw_data.len();
        tracing::info!("Extracted {} records", extracted);

        tracing::info!("Transforming data...");
        let transformed = self.pipeline.transform(raw_data)?;
        tracing::info!("Transformed {} records", transformed.row_count());

        if !transformed.samples.is_empty() {
            tracing::info!("🔗 Sample slugs generated:");
            for sample in &transformed.samples {
                tracing::info!("  \"{}\" -> \"{}\"", sample.title, sample.slug);
            }
        }

        Ok(transformed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::PropertyRecord;
    use crate::utils::error::EtlError;
    use std::cell::RefCell;

    struct StubPipeline {
        records: usize,
        fail_extract: bool,
        loaded: RefCell<Option<String>>,
    }

    impl StubPipeline {
        fn new(records: usize) -> Self {
            Self {
                records,
                fail_extract: false,
                loaded: RefCell::new(None),
            }
        }
    }

    impl Pipeline for StubPipeline {
        fn extract(&self) -> Result<Vec<PropertyRecord>> {
            if self.fail_extract {
                return Err(EtlError::InputNotFound {
                    path: "missing.json".to_string(),
                });
            }
            Ok((0..self.records)
                .map(|_| PropertyRecord::new(serde_json::json!({})))
                .collect())
        }

        fn transform(&self, data: Vec<PropertyRecord>) -> Result<TransformResult> {
            let rows: Vec<String> = (1..=data.len()).map(|i| i.to_string()).collect();
            let mut lines = vec!["id".to_string()];
            lines.extend(rows.iter().cloned());
            Ok(TransformResult {
                header: "id".to_string(),
                csv_output: lines.join("\n"),
                rows,
                samples: vec![],
            })
        }

        fn load(&self, result: TransformResult) -> Result<String> {
            *self.loaded.borrow_mut() = Some(result.csv_output);
            Ok("out.csv".to_string())
        }
    }

    #[test]
    fn test_run_reports_record_count() {
        let engine = EtlEngine::new(StubPipeline::new(3));
        let report = engine.run().unwrap();

        assert_eq!(report.records_processed, 3);
        assert_eq!(report.output_path, "out.csv");
        assert_eq!(
            engine.pipeline().loaded.borrow().as_deref(),
            Some("id\n1\n2\n3")
        );
    }

    #[test]
    fn test_failed_extract_skips_load() {
        let mut pipeline = StubPipeline::new(3);
        pipeline.fail_extract = true;
        let engine = EtlEngine::new(pipeline);

        assert!(engine.run().is_err());
        assert!(engine.pipeline().loaded.borrow().is_none());
    }

    #[test]
    fn test_preview_does_not_load() {
        let engine = EtlEngine::new(StubPipeline::new(2));
        let result = engine.preview().unwrap();
        assert_eq!(result.row_count(), 2);
        assert!(engine.pipeline().loaded.borrow().is_none());
    }
}
