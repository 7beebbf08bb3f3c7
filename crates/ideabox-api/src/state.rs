//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use ideabox_cache::CacheManager;
use ideabox_core::config::AppConfig;
use ideabox_core::traits::storage::StorageProvider;
use ideabox_database::RecordBackend;
use ideabox_service::{
    ContainerService, FolderService, IdeaService, LinkPreviewService, PathResolver, SearchService,
    TagService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Record store backend, kept for health checks
    pub backend: RecordBackend,
    /// Link preview cache
    pub cache: CacheManager,
    /// Attachment storage
    pub storage: Arc<dyn StorageProvider>,

    // ── Services ─────────────────────────────────────────────
    /// Path resolver
    pub path_resolver: Arc<PathResolver>,
    /// Containers
    pub container_service: Arc<ContainerService>,
    /// Folders
    pub folder_service: Arc<FolderService>,
    /// Ideas
    pub idea_service: Arc<IdeaService>,
    /// Tags
    pub tag_service: Arc<TagService>,
    /// Recursive search
    pub search_service: Arc<SearchService>,
    /// Link previews
    pub preview_service: Arc<LinkPreviewService>,
}
