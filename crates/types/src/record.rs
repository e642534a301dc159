//! Loosely-typed report records and the corpus that holds them.
//!
//! A [`Record`] keeps whatever object shape the source line had. Every lookup is an explicit
//! presence check: a key that is missing, `null`, or an empty string reads as absent.

use serde_json::{Map, Value};
use std::borrow::Cow;

/// Errors raised while turning one source line into a [`Record`].
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("expected a JSON object, found {0}")]
    NotAnObject(&'static str),
}

/// One parsed report entry.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Parses a single line of line-delimited JSON.
    ///
    /// Any object shape is accepted. Arrays, strings and other non-object values are rejected.
    pub fn from_json_line(line: &str) -> Result<Self, RecordError> {
        match serde_json::from_str::<Value>(line.trim())? {
            Value::Object(map) => Ok(Self(map)),
            other => Err(RecordError::NotAnObject(kind_name(&other))),
        }
    }

    /// Returns the populated value of `field`, or `None` when it is absent.
    ///
    /// Strings are borrowed as-is. Numbers and booleans are rendered as their JSON text.
    /// `null`, empty strings and empty arrays/objects read as absent. A whitespace-only string
    /// is present, matching the non-empty rule used for free text.
    pub fn get(&self, field: &str) -> Option<Cow<'_, str>> {
        match self.0.get(field)? {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(Cow::Borrowed(s.as_str())),
            Value::Array(items) if items.is_empty() => None,
            Value::Object(map) if map.is_empty() => None,
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    /// Returns the raw string value of a free-text field.
    ///
    /// Unlike [`Record::get`], an empty string is returned rather than treated as absent, so
    /// callers can measure its length. Non-string values yield `None`.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    /// True when `field` holds a populated value.
    pub fn has(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Names of all populated fields in this record.
    pub fn populated_fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.0
            .keys()
            .filter(|key| self.has(key))
            .map(String::as_str)
    }

    /// Number of keys in the record, populated or not.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// The full ordered set of loaded records.
///
/// Order is the order of the source file. Aggregations do not depend on it, but it is kept so
/// that iteration is reproducible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Corpus {
    records: Vec<Record>,
}

impl Corpus {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Number of records in which `field` is populated.
    pub fn count_populated(&self, field: &str) -> usize {
        self.iter().filter(|record| record.has(field)).count()
    }
}

impl FromIterator<Record> for Corpus {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
