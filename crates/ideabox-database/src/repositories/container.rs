//! Container repository implementation.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use ideabox_core::error::{AppError, ErrorKind};
use ideabox_core::result::AppResult;
use ideabox_core::types::{FilterField, SortField};
use ideabox_entity::container::{Container, CreateContainer};

use super::query::{Column, ColumnKind, push_filters, push_sort};
use crate::store::ContainerStore;

const NAME_CONSTRAINT: &str = "containers_name_key";

/// Repository for container CRUD.
#[derive(Debug, Clone)]
pub struct ContainerRepository {
    pool: PgPool,
}

impl ContainerRepository {
    /// Create a new container repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn columns(name: &str) -> Option<Column> {
        match name {
            "id" => Some(Column::new("id", ColumnKind::Uuid)),
            "name" => Some(Column::new("name", ColumnKind::Text)),
            "pinned" => Some(Column::new("pinned", ColumnKind::Bool)),
            "hidden" => Some(Column::new("hidden", ColumnKind::Bool)),
            "created" => Some(Column::new("created_at", ColumnKind::Timestamp)),
            _ => None,
        }
    }

    fn map_write_error(e: sqlx::Error, name: &str, action: &str) -> AppError {
        match e {
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some(NAME_CONSTRAINT) => {
                AppError::conflict(format!("Container name '{name}' already exists"))
            }
            _ => AppError::with_source(ErrorKind::Database, format!("Failed to {action} container"), e),
        }
    }
}

#[async_trait]
impl ContainerStore for ContainerRepository {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Container>> {
        sqlx::query_as::<_, Container>("SELECT * FROM containers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find container", e))
    }

    async fn exists(&self, id: Uuid) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM containers WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to check container", e)
            })
    }

    async fn list(&self, filters: &[FilterField], sort: &[SortField]) -> AppResult<Vec<Container>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM containers");
        push_filters(&mut qb, filters, Self::columns)?;
        push_sort(&mut qb, sort, Self::columns)?;

        qb.build_query_as::<Container>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list containers", e))
    }

    async fn create(&self, data: &CreateContainer) -> AppResult<Container> {
        sqlx::query_as::<_, Container>(
            "INSERT INTO containers (name, icon, color, cover) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.icon)
        .bind(&data.color)
        .bind(&data.cover)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &data.name, "create"))
    }

    async fn update(&self, container: &Container) -> AppResult<Container> {
        sqlx::query_as::<_, Container>(
            "UPDATE containers SET name = $2, icon = $3, color = $4, cover = $5, pinned = $6, \
             hidden = $7, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(container.id)
        .bind(&container.name)
        .bind(&container.icon)
        .bind(&container.color)
        .bind(&container.cover)
        .bind(container.pinned)
        .bind(container.hidden)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| Self::map_write_error(e, &container.name, "update"))?
        .ok_or_else(|| AppError::not_found(format!("Container {} not found", container.id)))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM containers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete container", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
