//! Container handlers.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use uuid::Uuid;

use ideabox_core::error::AppError;
use ideabox_service::SaveContainer;

use super::attachment_response;
use crate::dto::request::ContainerListQuery;
use crate::dto::response::Existence;
use crate::extractors::FormData;
use crate::state::AppState;

async fn read_container_form(multipart: Multipart) -> Result<SaveContainer, AppError> {
    let mut form = FormData::read(multipart).await?;
    Ok(SaveContainer {
        name: form.required("name")?,
        icon: form.text_or_default("icon"),
        color: form.text_or_default("color"),
        remove_cover: form.flag("remove_cover"),
        cover: form.take_file("cover"),
    })
}

/// GET /api/containers?include_hidden=...
pub async fn list_containers(
    State(state): State<AppState>,
    Query(query): Query<ContainerListQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let containers = state.container_service.list(query.include_hidden).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": containers })))
}

/// GET /api/containers/{id}
pub async fn get_container(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let container = state.container_service.get(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": container })))
}

/// GET /api/containers/{id}/exists
pub async fn container_exists(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let exists = state.container_service.exists(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": Existence { exists } })))
}

/// POST /api/containers (multipart)
pub async fn create_container(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let input = read_container_form(multipart).await?;
    let container = state.container_service.create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "data": container })),
    ))
}

/// PUT /api/containers/{id} (multipart)
pub async fn update_container(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, AppError> {
    let input = read_container_form(multipart).await?;
    let container = state.container_service.update(id, input).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": container })))
}

/// DELETE /api/containers/{id}
pub async fn delete_container(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.container_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/containers/{id}/pin
pub async fn toggle_pin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let container = state.container_service.toggle_pin(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": container })))
}

/// POST /api/containers/{id}/hide
pub async fn toggle_hide(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let container = state.container_service.toggle_hide(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": container })))
}

/// GET /api/containers/{id}/cover
pub async fn get_cover(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (data, content_type) = state.container_service.cover(id).await?;
    attachment_response(data, content_type)
}
