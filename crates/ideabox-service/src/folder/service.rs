//! Folder CRUD and reparenting.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use ideabox_core::error::AppError;
use ideabox_core::result::AppResult;
use ideabox_core::traits::storage::StorageProvider;
use ideabox_core::types::{FilterField, SortField};
use ideabox_database::{EntryStore, FolderStore, Stores};
use ideabox_entity::entry::EntryKind;
use ideabox_entity::folder::{CreateFolder, Folder};

use crate::path::PathResolver;

/// Data for creating a folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFolder {
    /// Owning container.
    pub container_id: Uuid,
    /// Parent folder (None for the container root).
    pub parent_id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// Icon identifier.
    pub icon: String,
    /// Hex color.
    pub color: String,
}

/// Data for updating a folder's appearance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateFolder {
    /// Display name.
    pub name: String,
    /// Icon identifier.
    pub icon: String,
    /// Hex color.
    pub color: String,
}

/// Manages folders inside containers.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder store.
    folders: Arc<dyn FolderStore>,
    /// Entry store (for attachment cleanup).
    entries: Arc<dyn EntryStore>,
    /// Path resolver.
    resolver: Arc<PathResolver>,
    /// Attachment storage.
    storage: Arc<dyn StorageProvider>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        stores: &Stores,
        resolver: Arc<PathResolver>,
        storage: Arc<dyn StorageProvider>,
    ) -> Self {
        Self {
            folders: Arc::clone(&stores.folders),
            entries: Arc::clone(&stores.entries),
            resolver,
            storage,
        }
    }

    /// Folders directly inside the folder `path` points at, by name.
    pub async fn list(&self, container_id: Uuid, path: &str) -> AppResult<Vec<Folder>> {
        let parent = self.resolver.require_folder(container_id, path).await?;
        self.folders
            .list(
                &[
                    FilterField::eq("container", container_id),
                    FilterField::eq("parent", parent),
                ],
                &[SortField::asc("name")],
            )
            .await
    }

    /// Get a folder.
    pub async fn get(&self, id: Uuid) -> AppResult<Folder> {
        self.resolver.require_existing_folder(id).await
    }

    /// Create a folder at the root of a container or inside another folder.
    pub async fn create(&self, input: NewFolder) -> AppResult<Folder> {
        let name = required_name(&input.name)?;
        self.resolver.require_container(input.container_id).await?;
        if let Some(parent_id) = input.parent_id {
            let parent = self.resolver.require_existing_folder(parent_id).await?;
            if parent.container_id != input.container_id {
                return Err(AppError::validation(
                    "Parent folder belongs to another container",
                ));
            }
        }

        let folder = self
            .folders
            .create(&CreateFolder {
                container_id: input.container_id,
                parent_id: input.parent_id,
                name,
                icon: input.icon,
                color: input.color,
            })
            .await?;

        info!(folder_id = %folder.id, container_id = %folder.container_id, "Folder created");
        Ok(folder)
    }

    /// Rename or restyle a folder.
    pub async fn update(&self, id: Uuid, input: UpdateFolder) -> AppResult<Folder> {
        let mut folder = self.resolver.require_existing_folder(id).await?;
        folder.name = required_name(&input.name)?;
        folder.icon = input.icon;
        folder.color = input.color;

        let folder = self.folders.update(&folder).await?;
        info!(folder_id = %id, "Folder updated");
        Ok(folder)
    }

    /// Move a folder under another folder of the same container.
    pub async fn move_to(&self, id: Uuid, target: Uuid) -> AppResult<Folder> {
        let mut folder = self.resolver.require_existing_folder(id).await?;
        if target == id {
            return Err(AppError::validation("Cannot move a folder into itself"));
        }
        let target_folder = self.resolver.require_existing_folder(target).await?;
        if target_folder.container_id != folder.container_id {
            return Err(AppError::validation(
                "Target folder belongs to another container",
            ));
        }
        self.resolver.ensure_not_descendant(id, target).await?;

        folder.parent_id = Some(target);
        let folder = self.folders.update(&folder).await?;
        info!(folder_id = %id, parent_id = %target, "Folder moved");
        Ok(folder)
    }

    /// Move a folder up one level.
    pub async fn remove_from_parent(&self, id: Uuid) -> AppResult<Folder> {
        let mut folder = self.resolver.require_existing_folder(id).await?;
        let Some(parent_id) = folder.parent_id else {
            return Err(AppError::validation("Folder is already at root level"));
        };
        let parent = self.resolver.require_existing_folder(parent_id).await?;

        folder.parent_id = parent.parent_id;
        let folder = self.folders.update(&folder).await?;
        info!(folder_id = %id, "Folder moved to parent");
        Ok(folder)
    }

    /// Delete a folder together with its sub-folders and their ideas.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.resolver.require_existing_folder(id).await?;
        let images = self.subtree_images(id).await?;

        if !self.folders.delete(id).await? {
            return Err(AppError::not_found(format!("Folder {id} not found")));
        }
        for key in images {
            if let Err(e) = self.storage.delete(&key).await {
                warn!(key = %key, error = %e, "Failed to delete idea image");
            }
        }

        info!(folder_id = %id, "Folder deleted");
        Ok(())
    }

    /// Image keys of every image idea in the subtree rooted at `root`.
    async fn subtree_images(&self, root: Uuid) -> AppResult<Vec<String>> {
        let mut images = Vec::new();
        let mut frontier = vec![root];
        let mut seen = std::collections::HashSet::from([root]);

        while let Some(folder_id) = frontier.pop() {
            let joined = self
                .entries
                .list_joined(
                    EntryKind::Image,
                    &[FilterField::eq("base_entry.folder", folder_id)],
                    &[],
                )
                .await?;
            images.extend(
                joined
                    .iter()
                    .filter_map(|j| j.child.payload.image_path().map(str::to_string)),
            );

            let children = self
                .folders
                .list(&[FilterField::eq("parent", folder_id)], &[])
                .await?;
            for child in children {
                if seen.insert(child.id) {
                    frontier.push(child.id);
                }
            }
        }
        Ok(images)
    }
}

pub(crate) fn required_name(name: &str) -> AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Name must not be empty"));
    }
    Ok(name.to_string())
}
