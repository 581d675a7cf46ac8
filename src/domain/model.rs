use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One element of the input array. Kept verbatim so it can be re-serialized
/// into the `data` column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyRecord {
    pub data: Value,
}

impl PropertyRecord {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    /// Looks up `information.<field>`; absent when either level is missing
    /// or `information` is not an object.
    pub fn information_field(&self, field: &str) -> Option<&Value> {
        self.data
            .get("information")
            .and_then(Value::as_object)
            .and_then(|info| info.get(field))
    }
}

/// Raw, unescaped value of one CSV column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Null,
    Integer(i64),
    Text(String),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlugSample {
    pub title: String,
    pub slug: String,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub header: String,
    pub rows: Vec<String>,
    pub csv_output: String,
    pub samples: Vec<SlugSample>,
}

impl TransformResult {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtlReport {
    pub output_path: String,
    pub records_processed: usize,
}
