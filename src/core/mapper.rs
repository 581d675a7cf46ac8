use crate::core::json_text::{scalar_text, to_compact_json};
use crate::core::profile::{ColumnValue, Profile};
use crate::core::slug::slugify;
use crate::domain::model::{FieldValue, PropertyRecord};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// Title as found in the record, or the positional fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    pub text: String,
    /// Set only when the source title was a JSON string (or the fallback).
    pub is_text: bool,
}

impl Title {
    pub fn slug(&self) -> String {
        if self.is_text {
            slugify(Some(&self.text))
        } else {
            slugify(None)
        }
    }
}

/// Column values of one record together with the title and slug they were
/// derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedRow {
    pub fields: Vec<FieldValue>,
    pub title: String,
    pub slug: String,
}

/// Maps records to rows for one profile.
///
/// The run timestamp is fixed at construction, so every row of a run carries
/// the same `published_at`/`created_at`/`updated_at`.
#[derive(Debug, Clone)]
pub struct RowMapper {
    profile: Profile,
    timestamp: String,
}

impl RowMapper {
    pub fn new(profile: Profile, run_started_at: DateTime<Utc>) -> Self {
        let timestamp = profile.timestamp_format.format(&run_started_at);
        Self { profile, timestamp }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn formatted_timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn title(&self, record: &PropertyRecord, index: usize) -> Result<Title> {
        let title = match record.information_field(&self.profile.title_field) {
            Some(Value::String(s)) if !s.is_empty() => Title {
                text: s.clone(),
                is_text: true,
            },
            Some(value) if is_truthy(value) => Title {
                text: scalar_text(value)?,
                is_text: false,
            },
            _ => Title {
                text: format!("Property {}", index + 1),
                is_text: true,
            },
        };
        Ok(title)
    }

    pub fn status(&self, record: &PropertyRecord) -> i64 {
        match record.information_field("status") {
            Some(Value::String(s)) if *s == self.profile.active_status => 1,
            _ => 0,
        }
    }

    /// Produces one value per profile column, in column order.
    pub fn map_record(&self, record: &PropertyRecord, index: usize) -> Result<Vec<FieldValue>> {
        Ok(self.map_row(record, index)?.fields)
    }

    pub fn map_row(&self, record: &PropertyRecord, index: usize) -> Result<MappedRow> {
        let position = (index + 1) as i64;
        let title = self.title(record, index)?;
        let slug = title.slug();

        let fields = self
            .profile
            .columns
            .iter()
            .map(|column| -> Result<FieldValue> {
                let value = match &column.value {
                    ColumnValue::Sequence => FieldValue::Integer(position),
                    ColumnValue::ContentId { prefix, width } => {
                        FieldValue::Text(format!("{}{:0width$}", prefix, position, width = *width))
                    }
                    ColumnValue::Integer { value } => FieldValue::Integer(*value),
                    ColumnValue::Text { value } => FieldValue::Text(value.clone()),
                    ColumnValue::Title => FieldValue::Text(title.text.clone()),
                    ColumnValue::Slug => FieldValue::Text(slug.clone()),
                    ColumnValue::Status => FieldValue::Integer(self.status(record)),
                    ColumnValue::Timestamp => FieldValue::Text(self.timestamp.clone()),
                    ColumnValue::Data => FieldValue::Text(to_compact_json(&record.data)?),
                    ColumnValue::Null => FieldValue::Null,
                };
                Ok(value)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(MappedRow {
            fields,
            title: title.text,
            slug,
        })
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
