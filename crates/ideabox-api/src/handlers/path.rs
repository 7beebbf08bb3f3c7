//! Path resolution and search handlers.

use axum::Json;
use axum::extract::{Query, State};

use ideabox_core::error::AppError;
use ideabox_service::SearchQuery;

use crate::dto::request::{PathDetailsQuery, PathValidQuery, SearchParams};
use crate::dto::response::PathValidity;
use crate::state::AppState;

/// GET /api/path?container=...&folder=...
pub async fn path_details(
    State(state): State<AppState>,
    Query(query): Query<PathDetailsQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let details = state
        .path_resolver
        .get_path_details(query.container, query.folder)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": details })))
}

/// GET /api/path/valid?container=...&path=...
pub async fn path_valid(
    State(state): State<AppState>,
    Query(query): Query<PathValidQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let valid = state
        .path_resolver
        .check_valid(query.container, &query.path)
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": PathValidity { valid } })))
}

/// GET /api/search?container=...&q=...&tags=...&folder=...
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    let hits = state
        .search_service
        .search(&SearchQuery {
            container_id: params.container,
            folder_id: params.folder,
            query: params.q,
            tags: params.tags,
        })
        .await?;
    Ok(Json(serde_json::json!({ "success": true, "data": hits })))
}
