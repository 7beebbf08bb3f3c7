//! Health check handler.

use axum::Json;
use axum::extract::State;

use ideabox_core::traits::cache::CacheProvider;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

fn status_label(ok: bool) -> &'static str {
    if ok { "ok" } else { "unavailable" }
}

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let database = state.backend.health().await.to_string();
    let storage_ok = state.storage.health_check().await.unwrap_or(false);
    let cache_ok = state.cache.health_check().await.unwrap_or(false);

    let healthy = database != "unavailable" && storage_ok && cache_ok;

    Json(ApiResponse::ok(HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
        storage: status_label(storage_ok).to_string(),
        cache: status_label(cache_ok).to_string(),
    }))
}
