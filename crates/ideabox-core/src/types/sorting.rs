//! Sorting types for list queries.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::filter::FieldSource;
use crate::error::AppError;
use crate::result::AppResult;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Return the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A sort specification consisting of a field name and direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortField {
    /// Column or field name to sort by.
    pub field: String,
    /// Sort direction.
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortField {
    /// Create a new sort field.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Create an ascending sort on the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    /// Create a descending sort on the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

/// Sort records in place by the given keys, first key most significant.
///
/// The sort is stable, so records equal on every key keep their order.
pub fn sort_records<R: FieldSource>(records: &mut [R], sort: &[SortField]) -> AppResult<()> {
    if let Some(first) = records.first() {
        for key in sort {
            if first.field(&key.field).is_none() {
                return Err(AppError::validation(format!(
                    "Unknown sort field '{}'",
                    key.field
                )));
            }
        }
    }

    records.sort_by(|a, b| {
        for key in sort {
            let (Some(left), Some(right)) = (a.field(&key.field), b.field(&key.field)) else {
                continue;
            };
            let ordering = match key.direction {
                SortDirection::Asc => left.compare(&right),
                SortDirection::Desc => right.compare(&left),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::filter::FilterValue;

    #[derive(Debug)]
    struct Board {
        name: &'static str,
        pinned: bool,
        hidden: bool,
    }

    impl FieldSource for Board {
        fn field(&self, name: &str) -> Option<FilterValue> {
            match name {
                "name" => Some(self.name.into()),
                "pinned" => Some(self.pinned.into()),
                "hidden" => Some(self.hidden.into()),
                _ => None,
            }
        }
    }

    #[test]
    fn test_multi_key_sort() {
        let mut boards = vec![
            Board { name: "zeta", pinned: false, hidden: false },
            Board { name: "Alpha", pinned: false, hidden: false },
            Board { name: "beta", pinned: true, hidden: false },
            Board { name: "aaa", pinned: true, hidden: true },
        ];
        sort_records(
            &mut boards,
            &[
                SortField::asc("hidden"),
                SortField::desc("pinned"),
                SortField::asc("name"),
            ],
        )
        .unwrap();

        let names: Vec<_> = boards.iter().map(|b| b.name).collect();
        assert_eq!(names, ["beta", "Alpha", "zeta", "aaa"]);
    }

    #[test]
    fn test_unknown_sort_field() {
        let mut boards = vec![Board { name: "a", pinned: false, hidden: false }];
        assert!(sort_records(&mut boards, &[SortField::asc("color")]).is_err());
    }
}
