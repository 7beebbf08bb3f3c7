//! Application builder: wires stores, services, and router into an Axum app.

use std::sync::Arc;

use axum::Router;

use ideabox_cache::CacheManager;
use ideabox_core::config::AppConfig;
use ideabox_core::traits::storage::StorageProvider;
use ideabox_database::RecordBackend;
use ideabox_service::{
    ContainerService, FolderService, IdeaService, LinkPreviewService, PathResolver, PreviewFetcher,
    SearchService, TagService,
};

use crate::router::build_router;
use crate::state::AppState;

/// Builds the shared state from its infrastructure parts.
pub fn build_state(
    config: AppConfig,
    backend: RecordBackend,
    cache: CacheManager,
    storage: Arc<dyn StorageProvider>,
    fetcher: Arc<dyn PreviewFetcher>,
) -> AppState {
    let stores = backend.stores();
    let path_resolver = Arc::new(PathResolver::new(
        Arc::clone(&stores.containers),
        Arc::clone(&stores.folders),
    ));

    let container_service = Arc::new(ContainerService::new(&stores, Arc::clone(&storage)));
    let folder_service = Arc::new(FolderService::new(
        &stores,
        Arc::clone(&path_resolver),
        Arc::clone(&storage),
    ));
    let idea_service = Arc::new(IdeaService::new(
        &stores,
        Arc::clone(&path_resolver),
        Arc::clone(&storage),
    ));
    let tag_service = Arc::new(TagService::new(&stores, Arc::clone(&path_resolver)));
    let search_service = Arc::new(SearchService::new(&stores, Arc::clone(&path_resolver)));
    let preview_service = Arc::new(LinkPreviewService::new(&stores, cache.clone(), fetcher));

    AppState {
        config: Arc::new(config),
        backend,
        cache,
        storage,
        path_resolver,
        container_service,
        folder_service,
        idea_service,
        tag_service,
        search_service,
        preview_service,
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}
