//! Filter types for record store list queries.
//!
//! A list query carries a slice of [`FilterField`]s that are combined with
//! an implicit AND. Field names use the dotted relation form
//! (`base_entry.container`) so the same predicates can be compiled to SQL
//! or evaluated directly against in-memory records through [`FieldSource`].

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::result::AppResult;

/// Filter comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterOp {
    /// Exact equality. Comparing against [`FilterValue::Null`] means "is null".
    Eq,
    /// Case-insensitive substring on text fields, membership on list fields.
    Contains,
}

/// A dynamic filter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    /// A string value (ids are compared in their hyphenated form).
    String(String),
    /// A boolean value.
    Boolean(bool),
    /// A point in time.
    Timestamp(DateTime<Utc>),
    /// A list of strings, such as an entry's tag names.
    StringList(Vec<String>),
    /// Null / no value.
    Null,
}

impl FilterValue {
    /// Order two values of the same shape. Nulls sort first; values of
    /// different shapes compare equal.
    pub fn compare(&self, other: &FilterValue) -> Ordering {
        match (self, other) {
            (Self::String(a), Self::String(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Self::Boolean(a), Self::Boolean(b)) => a.cmp(b),
            (Self::Timestamp(a), Self::Timestamp(b)) => a.cmp(b),
            (Self::StringList(a), Self::StringList(b)) => a.cmp(b),
            (Self::Null, Self::Null) => Ordering::Equal,
            (Self::Null, _) => Ordering::Less,
            (_, Self::Null) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<Uuid> for FilterValue {
    fn from(value: Uuid) -> Self {
        Self::String(value.to_string())
    }
}

impl From<Option<Uuid>> for FilterValue {
    fn from(value: Option<Uuid>) -> Self {
        value.map_or(Self::Null, Self::from)
    }
}

impl From<DateTime<Utc>> for FilterValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl From<Vec<String>> for FilterValue {
    fn from(value: Vec<String>) -> Self {
        Self::StringList(value)
    }
}

/// A single filter condition on a named field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterField {
    /// The column or field name to filter on.
    pub field: String,
    /// The comparison operator.
    pub op: FilterOp,
    /// The value to compare against.
    pub value: FilterValue,
}

impl FilterField {
    /// Create a new filter field.
    pub fn new(field: impl Into<String>, op: FilterOp, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            op,
            value,
        }
    }

    /// Shorthand for an equality filter.
    pub fn eq(field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Self::new(field, FilterOp::Eq, value.into())
    }

    /// Shorthand for a substring / membership filter.
    pub fn contains(field: impl Into<String>, needle: impl Into<String>) -> Self {
        Self::new(field, FilterOp::Contains, FilterValue::String(needle.into()))
    }

    /// Evaluate this condition against a field value.
    pub fn matches(&self, actual: &FilterValue) -> bool {
        match self.op {
            FilterOp::Eq => actual == &self.value,
            FilterOp::Contains => match (actual, &self.value) {
                (FilterValue::String(haystack), FilterValue::String(needle)) => haystack
                    .to_lowercase()
                    .contains(&needle.to_lowercase()),
                (FilterValue::StringList(items), FilterValue::String(needle)) => {
                    items.iter().any(|item| item == needle)
                }
                _ => false,
            },
        }
    }
}

/// A record whose fields can be looked up by name for filtering and sorting.
pub trait FieldSource {
    /// Return the value of `name`, or `None` if the record has no such field.
    fn field(&self, name: &str) -> Option<FilterValue>;
}

/// Evaluate every filter against `record` (implicit AND).
///
/// Unknown field names are rejected rather than treated as non-matching.
pub fn matches_all<R: FieldSource + ?Sized>(record: &R, filters: &[FilterField]) -> AppResult<bool> {
    for filter in filters {
        let actual = record
            .field(&filter.field)
            .ok_or_else(|| AppError::validation(format!("Unknown filter field '{}'", filter.field)))?;
        if !filter.matches(&actual) {
            return Ok(false);
        }
    }
    Ok(true)
}
