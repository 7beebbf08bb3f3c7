//! Idea handlers.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use uuid::Uuid;

use ideabox_core::error::AppError;
use ideabox_service::{CreateIdea, UpdateIdea};

use super::attachment_response;
use crate::dto::request::{IdeaListQuery, MoveRequest};
use crate::extractors::FormData;
use crate::state::AppState;

/// GET /api/ideas?container=...&path=...&archived=...
pub async fn list_ideas(
    State(state): State<AppState>,
    Query(query): Query<IdeaListQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let ideas = state
        .idea_service
        .list(query.container, &query.path, query.archived)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": ideas })))
}

/// GET /api/ideas/{id}
pub async fn get_idea(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let idea = state.idea_service.get(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": idea })))
}

/// POST /api/ideas (multipart)
///
/// Fields: `container_id`, `folder_id`, `type`, `tags`, `content`, `link`,
/// and an `image` file part.
pub async fn create_idea(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let mut form = FormData::read(multipart).await?;
    let input = CreateIdea {
        container_id: form.required_uuid("container_id")?,
        folder_id: form.uuid("folder_id")?,
        kind: form.kind()?,
        tags: form.tags()?,
        content: form.text("content").map(str::to_string),
        link: form.text("link").map(str::to_string),
        image: form.take_file("image"),
    };

    let idea = state.idea_service.create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "success": true, "data": idea })),
    ))
}

/// PUT /api/ideas/{id} (multipart)
pub async fn update_idea(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<serde_json::Value>, AppError> {
    let mut form = FormData::read(multipart).await?;
    let input = UpdateIdea {
        kind: form.kind()?,
        tags: form.tags()?,
        content: form.text("content").map(str::to_string),
        link: form.text("link").map(str::to_string),
        image: form.take_file("image"),
    };

    let idea = state.idea_service.update(id, input).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": idea })))
}

/// DELETE /api/ideas/{id}
pub async fn delete_idea(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.idea_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/ideas/{id}/pin
pub async fn toggle_pin(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let idea = state.idea_service.toggle_pin(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": idea })))
}

/// POST /api/ideas/{id}/archive
pub async fn toggle_archive(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let idea = state.idea_service.toggle_archive(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": idea })))
}

/// POST /api/ideas/{id}/move
pub async fn move_idea(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let idea = state.idea_service.move_to(id, req.target_id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": idea })))
}

/// POST /api/ideas/{id}/remove-from-parent
pub async fn remove_from_parent(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let idea = state.idea_service.remove_from_parent(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": idea })))
}

/// GET /api/ideas/{id}/image
pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (data, content_type) = state.idea_service.image(id).await?;
    attachment_response(data, content_type)
}

/// GET /api/ideas/{id}/preview
///
/// `data` is `null` when the page could not be fetched.
pub async fn get_preview(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let preview = state.preview_service.get(id).await?;
    Ok(Json(serde_json::json!({ "success": true, "data": preview })))
}
