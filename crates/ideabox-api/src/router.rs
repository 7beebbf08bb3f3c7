//! Route definitions for the Idea Box HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.storage.max_upload_size_bytes as usize;
    let request_timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    let api_routes = Router::new()
        .merge(container_routes())
        .merge(folder_routes())
        .merge(idea_routes())
        .merge(tag_routes())
        .merge(path_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Container CRUD, flags, and cover image
fn container_routes() -> Router<AppState> {
    use handlers::container::*;

    Router::new()
        .route("/containers", get(list_containers).post(create_container))
        .route(
            "/containers/{id}",
            get(get_container)
                .put(update_container)
                .delete(delete_container),
        )
        .route("/containers/{id}/exists", get(container_exists))
        .route("/containers/{id}/pin", post(toggle_pin))
        .route("/containers/{id}/hide", post(toggle_hide))
        .route("/containers/{id}/cover", get(get_cover))
}

/// Folder CRUD and reparenting
fn folder_routes() -> Router<AppState> {
    use handlers::folder::*;

    Router::new()
        .route("/folders", get(list_folders).post(create_folder))
        .route(
            "/folders/{id}",
            get(get_folder).put(update_folder).delete(delete_folder),
        )
        .route("/folders/{id}/move", post(move_folder))
        .route("/folders/{id}/remove-from-parent", post(remove_from_parent))
}

/// Idea CRUD, flags, moves, image, and link preview
fn idea_routes() -> Router<AppState> {
    use handlers::idea::*;

    Router::new()
        .route("/ideas", get(list_ideas).post(create_idea))
        .route(
            "/ideas/{id}",
            get(get_idea).put(update_idea).delete(delete_idea),
        )
        .route("/ideas/{id}/pin", post(toggle_pin))
        .route("/ideas/{id}/archive", post(toggle_archive))
        .route("/ideas/{id}/move", post(move_idea))
        .route("/ideas/{id}/remove-from-parent", post(remove_from_parent))
        .route("/ideas/{id}/image", get(get_image))
        .route("/ideas/{id}/preview", get(get_preview))
}

/// Tag CRUD
fn tag_routes() -> Router<AppState> {
    use handlers::tag::*;

    Router::new()
        .route("/tags", get(list_tags).post(create_tag))
        .route("/tags/{id}", axum::routing::put(update_tag).delete(delete_tag))
}

/// Path details, path validation, and recursive search
fn path_routes() -> Router<AppState> {
    Router::new()
        .route("/path", get(handlers::path::path_details))
        .route("/path/valid", get(handlers::path::path_valid))
        .route("/search", get(handlers::path::search))
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
