//! Compiles [`FilterField`] / [`SortField`] lists into SQL.
//!
//! Field names are looked up in a per-query column whitelist, so only
//! known columns ever reach the statement text. Values are always bound.

use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use ideabox_core::error::AppError;
use ideabox_core::result::AppResult;
use ideabox_core::types::{FilterField, FilterOp, FilterValue, SortDirection, SortField};

/// How a column's values are bound and compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnKind {
    Uuid,
    Text,
    Bool,
    TextArray,
    /// A Postgres enum, compared through its text form.
    Enum,
    Timestamp,
}

/// A whitelisted column.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Column {
    pub expr: &'static str,
    pub kind: ColumnKind,
}

impl Column {
    pub(crate) const fn new(expr: &'static str, kind: ColumnKind) -> Self {
        Self { expr, kind }
    }
}

/// Append ` WHERE a AND b ...` for the given filters (nothing if empty).
pub(crate) fn push_filters<F>(
    qb: &mut QueryBuilder<'_, Postgres>,
    filters: &[FilterField],
    columns: F,
) -> AppResult<()>
where
    F: Fn(&str) -> Option<Column>,
{
    for (index, filter) in filters.iter().enumerate() {
        let column = columns(&filter.field).ok_or_else(|| {
            AppError::validation(format!("Unknown filter field '{}'", filter.field))
        })?;

        qb.push(if index == 0 { " WHERE " } else { " AND " });

        match (filter.op, &filter.value, column.kind) {
            (FilterOp::Eq, FilterValue::Null, _) => {
                qb.push(column.expr).push(" IS NULL");
            }
            (FilterOp::Eq, FilterValue::String(value), ColumnKind::Uuid) => {
                let id = Uuid::parse_str(value).map_err(|_| {
                    AppError::validation(format!("Invalid id '{value}' for '{}'", filter.field))
                })?;
                qb.push(column.expr).push(" = ").push_bind(id);
            }
            (FilterOp::Eq, FilterValue::String(value), ColumnKind::Text) => {
                qb.push(column.expr).push(" = ").push_bind(value.clone());
            }
            (FilterOp::Eq, FilterValue::String(value), ColumnKind::Enum) => {
                qb.push(column.expr)
                    .push("::text = ")
                    .push_bind(value.clone());
            }
            (FilterOp::Eq, FilterValue::Boolean(value), ColumnKind::Bool) => {
                qb.push(column.expr).push(" = ").push_bind(*value);
            }
            (FilterOp::Contains, FilterValue::String(value), ColumnKind::Text) => {
                qb.push(column.expr)
                    .push(" ILIKE ")
                    .push_bind(format!("%{}%", escape_like(value)));
            }
            (FilterOp::Contains, FilterValue::String(value), ColumnKind::TextArray) => {
                qb.push_bind(value.clone())
                    .push(" = ANY(")
                    .push(column.expr)
                    .push(")");
            }
            _ => {
                return Err(AppError::validation(format!(
                    "Unsupported filter on '{}'",
                    filter.field
                )));
            }
        }
    }
    Ok(())
}

/// Append ` ORDER BY ...` for the given sort keys (nothing if empty).
pub(crate) fn push_sort<F>(
    qb: &mut QueryBuilder<'_, Postgres>,
    sort: &[SortField],
    columns: F,
) -> AppResult<()>
where
    F: Fn(&str) -> Option<Column>,
{
    for (index, key) in sort.iter().enumerate() {
        let column = columns(&key.field)
            .ok_or_else(|| AppError::validation(format!("Unknown sort field '{}'", key.field)))?;

        qb.push(if index == 0 { " ORDER BY " } else { ", " });
        if column.kind == ColumnKind::Text {
            qb.push("LOWER(").push(column.expr).push(")");
        } else {
            qb.push(column.expr);
        }
        qb.push(" ").push(key.direction.as_sql());
        if key.direction == SortDirection::Asc {
            qb.push(" NULLS FIRST");
        } else {
            qb.push(" NULLS LAST");
        }
    }
    Ok(())
}

fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
