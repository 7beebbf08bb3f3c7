//! Tag repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use ideabox_core::error::{AppError, ErrorKind};
use ideabox_core::result::AppResult;
use ideabox_core::types::{FilterField, SortField};
use ideabox_entity::tag::{CreateTag, Tag};

use super::query::{Column, ColumnKind, push_filters, push_sort};
use crate::store::TagStore;

const NAME_CONSTRAINT: &str = "tags_container_id_name_key";

/// Repository for tag CRUD.
#[derive(Debug, Clone)]
pub struct TagRepository {
    pool: PgPool,
}

impl TagRepository {
    /// Create a new tag repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn columns(name: &str) -> Option<Column> {
        match name {
            "id" => Some(Column::new("id", ColumnKind::Uuid)),
            "container" => Some(Column::new("container_id", ColumnKind::Uuid)),
            "name" => Some(Column::new("name", ColumnKind::Text)),
            _ => None,
        }
    }

    fn map_write_error(e: sqlx::Error, name: &str, action: &str) -> AppError {
        match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(NAME_CONSTRAINT) => {
                AppError::conflict(format!("Tag '{name}' already exists in this container"))
            }
            _ => AppError::with_source(ErrorKind::Database, format!("Failed to {action} tag"), e),
        }
    }
}

#[async_trait]
impl TagStore for TagRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Tag>> {
        sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find tag", e))
    }

    async fn list(&self, filters: &[FilterField], sort: &[SortField]) -> AppResult<Vec<Tag>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM tags");
        push_filters(&mut qb, filters, Self::columns)?;
        push_sort(&mut qb, sort, Self::columns)?;

        qb.build_query_as::<Tag>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tags", e))
    }

    async fn create(&self, data: &CreateTag) -> AppResult<Tag> {
        sqlx::query_as::<_, Tag>(
            "INSERT INTO tags (container_id, name, icon, color) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(data.container_id)
        .bind(&data.name)
        .bind(&data.icon)
        .bind(&data.color)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &data.name, "create"))
    }

    async fn update(&self, tag: &Tag) -> AppResult<Tag> {
        sqlx::query_as::<_, Tag>(
            "UPDATE tags SET name = $2, icon = $3, color = $4, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(tag.id)
        .bind(&tag.name)
        .bind(&tag.icon)
        .bind(&tag.color)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &tag.name, "update"))?
        .ok_or_else(|| AppError::not_found(format!("Tag {} not found", tag.id)))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete tag", e))?;
        Ok(result.rows_affected() > 0)
    }
}
