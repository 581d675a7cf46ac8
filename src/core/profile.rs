use crate::core::escape::NullPolicy;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_PROFILE: &str = "advanced";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    /// `YYYY-MM-DD HH:MM:SS` in UTC.
    #[default]
    DateTime,
    /// `MM/DD/YYYY`.
    LocaleDate,
}

impl TimestampFormat {
    pub fn format(&self, at: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::DateTime => at.format("%Y-%m-%d %H:%M:%S").to_string(),
            TimestampFormat::LocaleDate => at.format("%m/%d/%Y").to_string(),
        }
    }
}

/// Derivation rule for a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnValue {
    /// 1-based position of the record.
    Sequence,
    /// `prefix` followed by the 1-based position zero-padded to `width`.
    ContentId { prefix: String, width: usize },
    Integer { value: i64 },
    Text { value: String },
    Title,
    Slug,
    Status,
    Timestamp,
    /// The whole record as compact JSON.
    Data,
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(flatten)]
    pub value: ColumnValue,
}

impl Column {
    pub fn new(name: &str, value: ColumnValue) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }
}

/// A named output schema: ordered columns plus the formatting policies that
/// apply to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    pub title_field: String,
    pub active_status: String,
    #[serde(default)]
    pub null_policy: NullPolicy,
    #[serde(default)]
    pub timestamp_format: TimestampFormat,
    pub columns: Vec<Column>,
}

impl Profile {
    pub fn builtin_names() -> &'static [&'static str] {
        &["advanced", "standard", "minimal"]
    }

    pub fn builtin(name: &str) -> Option<Profile> {
        match name {
            "advanced" => Some(Self::content_entries(
                "advanced",
                ColumnValue::ContentId {
                    prefix: "PR-".to_string(),
                    width: 4,
                },
            )),
            "standard" => Some(Self::content_entries(
                "standard",
                ColumnValue::Integer { value: 1 },
            )),
            "minimal" => Some(Self::minimal()),
            _ => None,
        }
    }

    pub fn resolve(name: &str) -> Result<Profile> {
        Self::builtin(name).ok_or_else(|| EtlError::UnknownProfile {
            name: name.to_string(),
            available: Self::builtin_names().join(", "),
        })
    }

    // content_entries import table, 14 columns
    fn content_entries(name: &str, content_id: ColumnValue) -> Profile {
        Profile {
            name: name.to_string(),
            title_field: "property_name".to_string(),
            active_status: "active".to_string(),
            null_policy: NullPolicy::Sentinel,
            timestamp_format: TimestampFormat::DateTime,
            columns: vec![
                Column::new("id", ColumnValue::Sequence),
                Column::new("author_id", ColumnValue::Integer { value: 1 }),
                Column::new("content_id", content_id),
                Column::new("title", ColumnValue::Title),
                Column::new("slug", ColumnValue::Slug),
                Column::new("published_at", ColumnValue::Timestamp),
                Column::new("data", ColumnValue::Data),
                Column::new("order", ColumnValue::Sequence),
                Column::new("created_at", ColumnValue::Timestamp),
                Column::new("updated_at", ColumnValue::Timestamp),
                Column::new(
                    "locale",
                    ColumnValue::Text {
                        value: "en".to_string(),
                    },
                ),
                Column::new("draftable_id", ColumnValue::Null),
                Column::new("status", ColumnValue::Status),
                Column::new("translation_id", ColumnValue::Null),
            ],
        }
    }

    fn minimal() -> Profile {
        Profile {
            name: "minimal".to_string(),
            title_field: "property_code".to_string(),
            active_status: "Active".to_string(),
            null_policy: NullPolicy::Empty,
            timestamp_format: TimestampFormat::LocaleDate,
            columns: vec![
                Column::new("id", ColumnValue::Sequence),
                Column::new("title", ColumnValue::Title),
                Column::new("slug", ColumnValue::Slug),
                Column::new("status", ColumnValue::Status),
                Column::new("data", ColumnValue::Data),
                Column::new("order", ColumnValue::Sequence),
                Column::new(
                    "locale",
                    ColumnValue::Text {
                        value: "en".to_string(),
                    },
                ),
                Column::new("created_at", ColumnValue::Timestamp),
                Column::new("updated_at", ColumnValue::Timestamp),
            ],
        }
    }

    pub fn header_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn header_line(&self, delimiter: char) -> String {
        let separator = delimiter.to_string();
        self.header_names().join(separator.as_str())
    }

    /// Header names end up unescaped in the first line, so they must not
    /// contain the delimiter.
    pub fn validate_for_delimiter(&self, delimiter: char) -> Result<()> {
        for column in &self.columns {
            if column.name.contains(delimiter) {
                return Err(EtlError::InvalidConfigValueError {
                    field: format!("profiles.{}.columns", self.name),
                    value: column.name.clone(),
                    reason: format!("Column name contains the delimiter {:?}", delimiter),
                });
            }
        }
        Ok(())
    }
}

impl Validate for Profile {
    fn validate(&self) -> Result<()> {
        let field = |suffix: &str| format!("profiles.{}.{}", self.name, suffix);

        validation::validate_non_empty_string(&field("title_field"), &self.title_field)?;
        validation::validate_non_empty_string(&field("active_status"), &self.active_status)?;

        if self.columns.is_empty() {
            return Err(EtlError::ConfigValidationError {
                field: field("columns"),
                message: "A profile needs at least one column".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            validation::validate_non_empty_string(&field("columns.name"), &column.name)?;
            if column.name.contains(['"', '\n', '\r']) {
                return Err(EtlError::InvalidConfigValueError {
                    field: field("columns.name"),
                    value: column.name.clone(),
                    reason: "Column names cannot contain quotes or line breaks".to_string(),
                });
            }
            if !seen.insert(column.name.as_str()) {
                return Err(EtlError::InvalidConfigValueError {
                    field: field("columns.name"),
                    value: column.name.clone(),
                    reason: "Duplicate column name".to_string(),
                });
            }
            if let ColumnValue::ContentId { width, .. } = &column.value {
                validation::validate_range(&field("columns.width"), *width, 1, 12)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_builtin_profiles_are_valid() {
        for name in Profile::builtin_names() {
            let profile = Profile::builtin(name).unwrap();
            assert_eq!(profile.name, *name);
            assert!(profile.validate().is_ok(), "profile {} invalid", name);
        }
    }

    #[test]
    fn test_content_entry_header() {
        let profile = Profile::builtin("advanced").unwrap();
        assert_eq!(
            profile.header_line(','),
            "id,author_id,content_id,title,slug,published_at,data,order,created_at,updated_at,locale,draftable_id,status,translation_id"
        );
        assert_eq!(profile.columns.len(), 14);
        assert_eq!(Profile::builtin("standard").unwrap().columns.len(), 14);
    }

    #[test]
    fn test_minimal_profile_shape() {
        let profile = Profile::builtin("minimal").unwrap();
        assert_eq!(profile.columns.len(), 9);
        assert_eq!(profile.title_field, "property_code");
        assert_eq!(profile.active_status, "Active");
        assert_eq!(profile.null_policy, NullPolicy::Empty);
        assert_eq!(profile.timestamp_format, TimestampFormat::LocaleDate);
    }

    #[test]
    fn test_resolve_unknown_profile() {
        let err = Profile::resolve("legacy").unwrap_err();
        assert!(matches!(err, EtlError::UnknownProfile { .. }));
        assert!(err.to_string().contains("advanced"));
    }

    #[test]
    fn test_timestamp_formats() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(TimestampFormat::DateTime.format(&at), "2024-03-07 09:05:01");
        assert_eq!(TimestampFormat::LocaleDate.format(&at), "03/07/2024");
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let mut profile = Profile::builtin("minimal").unwrap();
        profile.columns.push(Column::new("slug", ColumnValue::Slug));
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_content_id_width_range() {
        let mut profile = Profile::builtin("advanced").unwrap();
        profile.columns[2].value = ColumnValue::ContentId {
            prefix: "PR-".to_string(),
            width: 0,
        };
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_header_may_not_contain_delimiter() {
        let mut profile = Profile::builtin("minimal").unwrap();
        profile.columns[0].name = "id;pk".to_string();
        assert!(profile.validate_for_delimiter(',').is_ok());
        assert!(profile.validate_for_delimiter(';').is_err());
    }
}
