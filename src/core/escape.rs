use crate::domain::model::FieldValue;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

pub const NULL_SENTINEL: &str = "NULL";

/// How an absent value is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NullPolicy {
    /// Literal `NULL`, as database import tools expect.
    #[default]
    Sentinel,
    Empty,
}

impl NullPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            NullPolicy::Sentinel => NULL_SENTINEL,
            NullPolicy::Empty => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvEscaper {
    null_policy: NullPolicy,
    delimiter: char,
}

impl CsvEscaper {
    pub fn new(null_policy: NullPolicy, delimiter: char) -> Self {
        Self {
            null_policy,
            delimiter,
        }
    }

    pub fn null_policy(&self) -> NullPolicy {
        self.null_policy
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    pub fn escape<'a>(&self, value: &'a FieldValue) -> Cow<'a, str> {
        match value {
            FieldValue::Null => Cow::Borrowed(self.null_policy.as_str()),
            FieldValue::Integer(n) => Cow::Owned(n.to_string()),
            FieldValue::Text(text) => self.escape_text(text),
        }
    }

    pub fn escape_text<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let needs_quotes = text
            .chars()
            .any(|c| c == self.delimiter || c == '"' || c == '\n');
        if needs_quotes {
            Cow::Owned(format!("\"{}\"", text.replace('"', "\"\"")))
        } else {
            Cow::Borrowed(text)
        }
    }

    /// Escapes every field and joins them with the delimiter.
    pub fn join_row(&self, fields: &[FieldValue]) -> String {
        let mut line = String::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                line.push(self.delimiter);
            }
            line.push_str(&self.escape(field));
        }
        line
    }
}

impl Default for CsvEscaper {
    fn default() -> Self {
        Self::new(NullPolicy::Sentinel, ',')
    }
}

/// Comma-delimited escaping under the given NULL policy.
pub fn escape_field(value: &FieldValue, null_policy: NullPolicy) -> String {
    CsvEscaper::new(null_policy, ',').escape(value).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_wraps_fields_with_special_characters() {
        let escaper = CsvEscaper::default();
        assert_eq!(escaper.escape(&"a,b".into()), "\"a,b\"");
        assert_eq!(escaper.escape(&"say \"hi\"".into()), "\"say \"\"hi\"\"\"");
        assert_eq!(escaper.escape(&"line1\nline2".into()), "\"line1\nline2\"");
    }

    #[test]
    fn test_escape_passes_plain_values_through() {
        let escaper = CsvEscaper::default();
        assert_eq!(escaper.escape(&"Sunset Villa".into()), "Sunset Villa");
        assert_eq!(escaper.escape(&"".into()), "");
        assert_eq!(escaper.escape(&FieldValue::Integer(42)), "42");
        assert_eq!(escaper.escape(&FieldValue::Integer(-7)), "-7");
    }

    #[test]
    fn test_escape_null_follows_policy() {
        assert_eq!(escape_field(&FieldValue::Null, NullPolicy::Sentinel), "NULL");
        assert_eq!(escape_field(&FieldValue::Null, NullPolicy::Empty), "");

        let escaper = CsvEscaper::new(NullPolicy::Empty, ',');
        assert_eq!(escaper.null_policy(), NullPolicy::Empty);
    }

    #[test]
    fn test_escape_respects_custom_delimiter() {
        let escaper = CsvEscaper::new(NullPolicy::Sentinel, '\t');
        assert_eq!(escaper.escape(&"a,b".into()), "a,b");
        assert_eq!(escaper.escape(&"a\tb".into()), "\"a\tb\"");
    }

    #[test]
    fn test_join_row() {
        let escaper = CsvEscaper::default();
        let fields = vec![
            FieldValue::Integer(1),
            "Villa, Beach".into(),
            FieldValue::Null,
        ];
        assert_eq!(escaper.join_row(&fields), "1,\"Villa, Beach\",NULL");
    }
}
