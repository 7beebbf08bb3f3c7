//! Folder repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use ideabox_core::error::{AppError, ErrorKind};
use ideabox_core::result::AppResult;
use ideabox_core::types::{FilterField, SortField};
use ideabox_entity::folder::{CreateFolder, Folder};

use super::query::{Column, ColumnKind, push_filters, push_sort};
use crate::store::FolderStore;

/// Repository for folder CRUD. Tree walks happen in the service layer,
/// one parent pointer at a time.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn columns(name: &str) -> Option<Column> {
        match name {
            "id" => Some(Column::new("id", ColumnKind::Uuid)),
            "container" => Some(Column::new("container_id", ColumnKind::Uuid)),
            "parent" => Some(Column::new("parent_id", ColumnKind::Uuid)),
            "name" => Some(Column::new("name", ColumnKind::Text)),
            "created" => Some(Column::new("created_at", ColumnKind::Timestamp)),
            _ => None,
        }
    }
}

#[async_trait]
impl FolderStore for FolderRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn exists(&self, id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM folders WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to check folder", e))
    }

    async fn list(&self, filters: &[FilterField], sort: &[SortField]) -> AppResult<Vec<Folder>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM folders");
        push_filters(&mut qb, filters, Self::columns)?;
        push_sort(&mut qb, sort, Self::columns)?;

        qb.build_query_as::<Folder>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (container_id, parent_id, name, icon, color) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.container_id)
        .bind(data.parent_id)
        .bind(&data.name)
        .bind(&data.icon)
        .bind(&data.color)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create folder", e))
    }

    async fn update(&self, folder: &Folder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET parent_id = $2, name = $3, icon = $4, color = $5, \
             updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(folder.id)
        .bind(folder.parent_id)
        .bind(&folder.name)
        .bind(&folder.icon)
        .bind(&folder.color)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update folder", e))?
        .ok_or_else(|| AppError::not_found(format!("Folder {} not found", folder.id)))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
