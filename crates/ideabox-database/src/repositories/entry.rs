//! Entry repository implementation.
//!
//! The base table `entries` holds the type-agnostic fields; each kind has
//! a child table with a `base_entry` foreign key and one payload column.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use ideabox_core::error::{AppError, ErrorKind};
use ideabox_core::result::AppResult;
use ideabox_core::types::{FilterField, SortField};
use ideabox_entity::entry::{
    ChildRecord, CreateEntry, Entry, EntryKind, EntryPayload, JoinedEntry,
};

use super::query::{Column, ColumnKind, push_filters, push_sort};
use crate::store::EntryStore;

/// Repository for base entries and their typed child rows.
#[derive(Debug, Clone)]
pub struct EntryRepository {
    pool: PgPool,
}

#[derive(Debug, FromRow)]
struct ChildRow {
    id: Uuid,
    base_entry: Uuid,
    payload: String,
}

#[derive(Debug, FromRow)]
struct JoinedRow {
    child_id: Uuid,
    payload: String,
    #[sqlx(flatten)]
    base: Entry,
}

/// Child table and payload column for a kind.
fn child_table(kind: EntryKind) -> (&'static str, &'static str) {
    match kind {
        EntryKind::Text => ("entries_text", "content"),
        EntryKind::Link => ("entries_link", "link"),
        EntryKind::Image => ("entries_image", "image"),
    }
}

fn payload_of(kind: EntryKind, value: String) -> EntryPayload {
    match kind {
        EntryKind::Text => EntryPayload::Text { content: value },
        EntryKind::Link => EntryPayload::Link { link: value },
        EntryKind::Image => EntryPayload::Image { image: value },
    }
}

fn payload_value(payload: &EntryPayload) -> &str {
    match payload {
        EntryPayload::Text { content } => content,
        EntryPayload::Link { link } => link,
        EntryPayload::Image { image } => image,
    }
}

impl ChildRow {
    fn into_record(self, kind: EntryKind) -> ChildRecord {
        ChildRecord {
            id: self.id,
            base_entry: self.base_entry,
            payload: payload_of(kind, self.payload),
        }
    }
}

impl EntryRepository {
    /// Create a new entry repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn base_columns(name: &str) -> Option<Column> {
        match name {
            "id" => Some(Column::new("id", ColumnKind::Uuid)),
            "container" => Some(Column::new("container_id", ColumnKind::Uuid)),
            "folder" => Some(Column::new("folder_id", ColumnKind::Uuid)),
            "type" => Some(Column::new("kind", ColumnKind::Enum)),
            "tags" => Some(Column::new("tags", ColumnKind::TextArray)),
            "pinned" => Some(Column::new("pinned", ColumnKind::Bool)),
            "archived" => Some(Column::new("archived", ColumnKind::Bool)),
            "created" => Some(Column::new("created_at", ColumnKind::Timestamp)),
            "updated" => Some(Column::new("updated_at", ColumnKind::Timestamp)),
            _ => None,
        }
    }

    fn joined_columns(kind: EntryKind, name: &str) -> Option<Column> {
        if let Some(base) = name.strip_prefix("base_entry.") {
            let column = Self::base_columns(base)?;
            let expr = match base {
                "id" => "e.id",
                "container" => "e.container_id",
                "folder" => "e.folder_id",
                "type" => "e.kind",
                "tags" => "e.tags",
                "pinned" => "e.pinned",
                "archived" => "e.archived",
                "created" => "e.created_at",
                "updated" => "e.updated_at",
                _ => return None,
            };
            return Some(Column::new(expr, column.kind));
        }
        match (name, kind) {
            ("id", _) => Some(Column::new("c.id", ColumnKind::Uuid)),
            ("base_entry", _) => Some(Column::new("c.base_entry", ColumnKind::Uuid)),
            ("content", EntryKind::Text) => Some(Column::new("c.content", ColumnKind::Text)),
            ("link", EntryKind::Link) => Some(Column::new("c.link", ColumnKind::Text)),
            ("image", EntryKind::Image) => Some(Column::new("c.image", ColumnKind::Text)),
            _ => None,
        }
    }
}

#[async_trait]
impl EntryStore for EntryRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Entry>> {
        sqlx::query_as::<_, Entry>("SELECT * FROM entries WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find entry", e))
    }

    async fn exists(&self, id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM entries WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check entry", e))
    }

    async fn create(&self, data: &CreateEntry) -> AppResult<Entry> {
        sqlx::query_as::<_, Entry>(
            "INSERT INTO entries (container_id, folder_id, kind, tags) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.container_id)
        .bind(data.folder_id)
        .bind(data.kind)
        .bind(&data.tags)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create entry", e))
    }

    async fn update(&self, entry: &Entry) -> AppResult<Entry> {
        sqlx::query_as::<_, Entry>(
            "UPDATE entries SET folder_id = $2, tags = $3, pinned = $4, archived = $5, \
             updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(entry.id)
        .bind(entry.folder_id)
        .bind(&entry.tags)
        .bind(entry.pinned)
        .bind(entry.archived)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update entry", e))?
        .ok_or_else(|| AppError::not_found(format!("Idea {} not found", entry.id)))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete entry", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, filters: &[FilterField]) -> AppResult<u64> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM entries");
        push_filters(&mut qb, filters, Self::base_columns)?;

        let count = qb
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count entries", e))?;
        Ok(count.max(0) as u64)
    }

    async fn insert_child(&self, base_entry: Uuid, payload: &EntryPayload) -> AppResult<ChildRecord> {
        let kind = payload.kind();
        let (table, column) = child_table(kind);
        let sql = format!(
            "INSERT INTO {table} (base_entry, {column}) VALUES ($1, $2) \
             RETURNING id, base_entry, {column} AS payload"
        );

        let row = sqlx::query_as::<_, ChildRow>(&sql)
            .bind(base_entry)
            .bind(payload_value(payload))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, format!("Failed to insert {kind} entry"), e)
            })?;
        Ok(row.into_record(kind))
    }

    async fn find_child(&self, kind: EntryKind, base_entry: Uuid) -> AppResult<Option<ChildRecord>> {
        let (table, column) = child_table(kind);
        let sql = format!(
            "SELECT id, base_entry, {column} AS payload FROM {table} WHERE base_entry = $1"
        );

        let row = sqlx::query_as::<_, ChildRow>(&sql)
            .bind(base_entry)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, format!("Failed to find {kind} entry"), e)
            })?;
        Ok(row.map(|r| r.into_record(kind)))
    }

    async fn update_child(&self, child: &ChildRecord) -> AppResult<ChildRecord> {
        let kind = child.payload.kind();
        let (table, column) = child_table(kind);
        let sql = format!(
            "UPDATE {table} SET {column} = $2 WHERE id = $1 \
             RETURNING id, base_entry, {column} AS payload"
        );

        let row = sqlx::query_as::<_, ChildRow>(&sql)
            .bind(child.id)
            .bind(payload_value(&child.payload))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, format!("Failed to update {kind} entry"), e)
            })?
            .ok_or_else(|| AppError::not_found(format!("{kind} entry {} not found", child.id)))?;
        Ok(row.into_record(kind))
    }

    async fn list_joined(
        &self,
        kind: EntryKind,
        filters: &[FilterField],
        sort: &[SortField],
    ) -> AppResult<Vec<JoinedEntry>> {
        let (table, column) = child_table(kind);
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT c.id AS child_id, c.{column} AS payload, e.* FROM {table} c \
             JOIN entries e ON e.id = c.base_entry"
        ));
        let columns = |name: &str| Self::joined_columns(kind, name);
        push_filters(&mut qb, filters, columns)?;
        push_sort(&mut qb, sort, columns)?;

        let rows = qb
            .build_query_as::<JoinedRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, format!("Failed to list {kind} entries"), e)
            })?;

        Ok(rows
            .into_iter()
            .map(|row| JoinedEntry {
                child: ChildRecord {
                    id: row.child_id,
                    base_entry: row.base.id,
                    payload: payload_of(kind, row.payload),
                },
                base: row.base,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joined_columns_map_base_prefix() {
        let column = EntryRepository::joined_columns(EntryKind::Link, "base_entry.folder").unwrap();
        assert_eq!(column.expr, "e.folder_id");
        assert_eq!(column.kind, ColumnKind::Uuid);

        assert!(EntryRepository::joined_columns(EntryKind::Link, "link").is_some());
        assert!(EntryRepository::joined_columns(EntryKind::Link, "content").is_none());
    }

    #[test]
    fn test_child_tables() {
        assert_eq!(child_table(EntryKind::Image), ("entries_image", "image"));
        assert_eq!(
            payload_of(EntryKind::Text, "hi".into()),
            EntryPayload::Text { content: "hi".into() }
        );
    }
}
