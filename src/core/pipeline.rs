use crate::core::escape::CsvEscaper;
use crate::core::mapper::RowMapper;
use crate::core::{ConfigProvider, Pipeline, PropertyRecord, Storage, TransformResult};
use crate::domain::model::SlugSample;
use crate::utils::error::{EtlError, Result};
use serde_json::Value;

/// Number of (title, slug) pairs kept for the run summary.
pub const SAMPLE_SIZE: usize = 5;

/// Reads property records, maps them through a [`RowMapper`] and writes one
/// CSV file.
pub struct PropertyPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    mapper: RowMapper,
    escaper: CsvEscaper,
}

impl<S: Storage, C: ConfigProvider> PropertyPipeline<S, C> {
    pub fn new(storage: S, config: C, mapper: RowMapper) -> Self {
        let escaper = CsvEscaper::new(mapper.profile().null_policy, config.delimiter());
        Self {
            storage,
            config,
            mapper,
            escaper,
        }
    }

    pub fn mapper(&self) -> &RowMapper {
        &self.mapper
    }

    pub fn escaper(&self) -> &CsvEscaper {
        &self.escaper
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for PropertyPipeline<S, C> {
    fn extract(&self) -> Result<Vec<PropertyRecord>> {
        let input_path = self.config.input_path();
        tracing::debug!("Reading input from: {}", input_path);

        let bytes = self.storage.read_file(input_path)?;
        tracing::debug!("Read {} bytes", bytes.len());

        let json_data: Value =
            serde_json::from_slice(&bytes).map_err(|source| EtlError::MalformedInput {
                path: input_path.to_string(),
                source,
            })?;

        match json_data {
            Value::Array(items) => Ok(items.into_iter().map(PropertyRecord::new).collect()),
            other => Err(EtlError::UnexpectedInputShape {
                path: input_path.to_string(),
                found: json_type_name(&other).to_string(),
            }),
        }
    }

    fn transform(&self, data: Vec<PropertyRecord>) -> Result<TransformResult> {
        let delimiter = self.escaper.delimiter();
        let header = self.mapper.profile().header_line(delimiter);
        let mut rows = Vec::with_capacity(data.len());
        let mut samples = Vec::new();

        for (index, record) in data.iter().enumerate() {
            // 任何一筆失敗都中止整個流程，保持行號與來源陣列對齊
            let mapped = self.mapper.map_row(record, index)?;
            tracing::debug!("Processing: \"{}\" -> slug: \"{}\"", mapped.title, mapped.slug);

            rows.push(self.escaper.join_row(&mapped.fields));

            if samples.len() < SAMPLE_SIZE {
                samples.push(SlugSample {
                    title: mapped.title,
                    slug: mapped.slug,
                });
            }
        }

        let separator = self.config.line_ending().as_str();
        let mut csv_output = header.clone();
        for row in &rows {
            csv_output.push_str(separator);
            csv_output.push_str(row);
        }

        Ok(TransformResult {
            header,
            rows,
            csv_output,
            samples,
        })
    }

    fn load(&self, result: TransformResult) -> Result<String> {
        let output_path = self.config.output_path();
        tracing::debug!(
            "Writing {} rows ({} bytes) to {}",
            result.row_count(),
            result.csv_output.len(),
            output_path
        );

        self.storage.write_file(output_path, result.csv_output.as_bytes())?;

        Ok(output_path.to_string())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
