//! Folder handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use ideabox_core::error::AppError;
use ideabox_service::{NewFolder, UpdateFolder};

use crate::dto::request::{
    CreateFolderRequest, FolderListQuery, MoveRequest, UpdateFolderRequest, validated,
};
use crate::state::AppState;

/// GET /api/folders?container=...&path=...
pub async fn list_folders(
    State(state): State<AppState>,
    Query(query): Query<FolderListQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let folders = state
        .folder_service
        .list(query.container, &query.path)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": folders })))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let folder = state.folder_service.get(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": folder })))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    Json(req): Json<CreateFolderRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let req = validated(req)?;
    let folder = state
        .folder_service
        .create(NewFolder {
            container_id: req.container_id,
            parent_id: req.parent_id,
            name: req.name,
            icon: req.icon,
            color: req.color,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "data": folder })),
    ))
}

/// PUT /api/folders/{id}
pub async fn update_folder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateFolderRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let req = validated(req)?;
    let folder = state
        .folder_service
        .update(
            id,
            UpdateFolder {
                name: req.name,
                icon: req.icon,
                color: req.color,
            },
        )
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": folder })))
}

/// POST /api/folders/{id}/move
pub async fn move_folder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let folder = state.folder_service.move_to(id, req.target_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": folder })))
}

/// POST /api/folders/{id}/remove-from-parent
pub async fn remove_from_parent(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let folder = state.folder_service.remove_from_parent(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": folder })))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.folder_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
