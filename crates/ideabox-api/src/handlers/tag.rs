//! Tag handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use ideabox_core::error::AppError;
use ideabox_service::SaveTag;

use crate::dto::request::{CreateTagRequest, TagListQuery, UpdateTagRequest, validated};
use crate::state::AppState;

/// GET /api/tags?container=...
pub async fn list_tags(
    State(state): State<AppState>,
    Query(query): Query<TagListQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let tags = state.tag_service.list(query.container).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": tags })))
}

/// POST /api/tags
pub async fn create_tag(
    State(state): State<AppState>,
    Json(req): Json<CreateTagRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let req = validated(req)?;
    let tag = state
        .tag_service
        .create(
            req.container_id,
            SaveTag {
                name: req.name,
                icon: req.icon,
                color: req.color,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "data": tag })),
    ))
}

/// PUT /api/tags/{id}
pub async fn update_tag(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTagRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let req = validated(req)?;
    let tag = state
        .tag_service
        .update(
            id,
            SaveTag {
                name: req.name,
                icon: req.icon,
                color: req.color,
            },
        )
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": tag })))
}

/// DELETE /api/tags/{id}
pub async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.tag_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
