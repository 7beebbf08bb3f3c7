//! Folder path resolution.
//!
//! Folders are a forest of parent pointers per container. Downward paths
//! are checked segment by segment against those pointers; upward walks
//! chase parents to the root and refuse to visit a folder twice.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use ideabox_core::error::AppError;
use ideabox_core::result::AppResult;
use ideabox_database::{ContainerStore, FolderStore};
use ideabox_entity::folder::{
    Folder, InvalidSegment, PathDetails, PathResolution, parse_path_segments,
};

/// Resolves and validates folder paths.
#[derive(Debug, Clone)]
pub struct PathResolver {
    /// Container store.
    containers: Arc<dyn ContainerStore>,
    /// Folder store.
    folders: Arc<dyn FolderStore>,
}

impl PathResolver {
    /// Creates a new path resolver.
    pub fn new(containers: Arc<dyn ContainerStore>, folders: Arc<dyn FolderStore>) -> Self {
        Self {
            containers,
            folders,
        }
    }

    /// Walk a root-to-leaf sequence of folder ids.
    ///
    /// Each folder must exist, belong to `container_id`, and have the
    /// previous segment as its parent (the first segment must be a root
    /// folder). Stops at the first offending segment.
    pub async fn resolve_path(
        &self,
        container_id: Uuid,
        segments: &[Uuid],
    ) -> AppResult<PathResolution> {
        let mut last: Option<Uuid> = None;

        for &segment in segments {
            let Some(folder) = self.folders.find_by_id(segment).await? else {
                return Ok(PathResolution::Invalid {
                    segment,
                    reason: InvalidSegment::Missing,
                });
            };
            if folder.parent_id != last {
                return Ok(PathResolution::Invalid {
                    segment,
                    reason: InvalidSegment::ParentMismatch,
                });
            }
            if folder.container_id != container_id {
                return Ok(PathResolution::Invalid {
                    segment,
                    reason: InvalidSegment::ContainerMismatch,
                });
            }
            last = Some(segment);
        }

        Ok(PathResolution::Valid { terminal: last })
    }

    /// Whether `path` is a valid folder path in an existing container.
    pub async fn check_valid(&self, container_id: Uuid, path: &str) -> AppResult<bool> {
        if !self.containers.exists(container_id).await? {
            return Ok(false);
        }
        let Ok(segments) = parse_path_segments(path) else {
            return Ok(false);
        };
        Ok(self.resolve_path(container_id, &segments).await?.is_valid())
    }

    /// Resolve a `/`-separated path inside an existing container to its
    /// terminal folder (`None` for the container root).
    pub async fn require_folder(&self, container_id: Uuid, path: &str) -> AppResult<Option<Uuid>> {
        self.require_container(container_id).await?;

        let invalid = || {
            AppError::invalid_path(format!(
                "Folder with path \"{path}\" does not exist in container \"{container_id}\""
            ))
        };
        let segments = parse_path_segments(path).map_err(|_| invalid())?;

        match self.resolve_path(container_id, &segments).await? {
            PathResolution::Valid { terminal } => Ok(terminal),
            PathResolution::Invalid { segment, reason } => {
                debug!(container_id = %container_id, %segment, ?reason, "Rejected folder path");
                Err(invalid())
            }
        }
    }

    /// The container plus the root-to-target route of folders.
    pub async fn get_path_details(
        &self,
        container_id: Uuid,
        folder_id: Option<Uuid>,
    ) -> AppResult<PathDetails> {
        let container = self
            .containers
            .find_by_id(container_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Container {container_id} not found")))?;

        let mut route = Vec::new();
        let mut visited = HashSet::new();
        let mut current = folder_id;

        while let Some(id) = current {
            if !visited.insert(id) {
                return Err(cycle_error(id));
            }
            let folder = self.folders.find_by_id(id).await?.ok_or_else(|| {
                AppError::not_found(format!("Folder with ID \"{id}\" does not exist"))
            })?;
            if folder.container_id != container_id {
                return Err(AppError::invalid_path("Invalid path"));
            }
            current = folder.parent_id;
            route.push(folder);
        }

        route.reverse();
        Ok(PathDetails { container, route })
    }

    /// Fail unless `new_parent` lies outside the subtree rooted at `folder_id`.
    pub async fn ensure_not_descendant(&self, folder_id: Uuid, new_parent: Uuid) -> AppResult<()> {
        let mut visited = HashSet::new();
        let mut current = Some(new_parent);

        while let Some(id) = current {
            if id == folder_id {
                return Err(AppError::validation(
                    "Cannot move a folder into itself or one of its descendants",
                ));
            }
            if !visited.insert(id) {
                return Err(cycle_error(id));
            }
            current = self
                .folders
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?
                .parent_id;
        }
        Ok(())
    }

    /// Fetch a folder, failing if it does not exist.
    pub async fn require_existing_folder(&self, folder_id: Uuid) -> AppResult<Folder> {
        self.folders
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Folder {folder_id} not found")))
    }

    /// Fail unless the container exists.
    pub async fn require_container(&self, container_id: Uuid) -> AppResult<()> {
        if self.containers.exists(container_id).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!("Container {container_id} not found")))
        }
    }
}

fn cycle_error(id: Uuid) -> AppError {
    AppError::integrity(format!("Folder {id} appears twice in its own ancestry"))
}
