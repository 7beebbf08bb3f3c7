//! Container CRUD, listing with counts, and cover images.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use ideabox_core::error::AppError;
use ideabox_core::result::AppResult;
use ideabox_core::traits::storage::StorageProvider;
use ideabox_core::types::{FilterField, SortField};
use ideabox_database::{ContainerStore, EntryStore, Stores};
use ideabox_entity::container::{Container, ContainerSummary, CreateContainer, EntryCounts};
use ideabox_entity::entry::EntryKind;
use ideabox_storage::mime_from_path;

use crate::attachment::{Upload, container_cover_key};
use crate::folder::service::required_name;

/// Data for creating or updating a container.
#[derive(Debug, Clone, Default)]
pub struct SaveContainer {
    /// Display name, unique across containers.
    pub name: String,
    /// Icon identifier.
    pub icon: String,
    /// Hex color.
    pub color: String,
    /// New cover image.
    pub cover: Option<Upload>,
    /// Drop the current cover (ignored when `cover` is set).
    pub remove_cover: bool,
}

/// Manages containers.
#[derive(Debug, Clone)]
pub struct ContainerService {
    /// Container store.
    containers: Arc<dyn ContainerStore>,
    /// Entry store (for counts and attachment cleanup).
    entries: Arc<dyn EntryStore>,
    /// Attachment storage.
    storage: Arc<dyn StorageProvider>,
}

impl ContainerService {
    /// Creates a new container service.
    pub fn new(stores: &Stores, storage: Arc<dyn StorageProvider>) -> Self {
        Self {
            containers: Arc::clone(&stores.containers),
            entries: Arc::clone(&stores.entries),
            storage,
        }
    }

    /// List containers with their entry counts.
    ///
    /// Visible containers come first, then pinned ones, then by name.
    pub async fn list(&self, include_hidden: bool) -> AppResult<Vec<ContainerSummary>> {
        let filters = if include_hidden {
            Vec::new()
        } else {
            vec![FilterField::eq("hidden", false)]
        };
        let containers = self
            .containers
            .list(
                &filters,
                &[
                    SortField::asc("hidden"),
                    SortField::desc("pinned"),
                    SortField::asc("name"),
                ],
            )
            .await?;

        let mut summaries = Vec::with_capacity(containers.len());
        for container in containers {
            let counts = self.counts(container.id).await?;
            summaries.push(ContainerSummary { container, counts });
        }
        Ok(summaries)
    }

    /// Get a container.
    pub async fn get(&self, id: Uuid) -> AppResult<Container> {
        self.containers
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Container {id} not found")))
    }

    /// Check whether a container exists.
    pub async fn exists(&self, id: Uuid) -> AppResult<bool> {
        self.containers.exists(id).await
    }

    /// Create a container, storing its cover first if one was uploaded.
    pub async fn create(&self, input: SaveContainer) -> AppResult<Container> {
        let name = required_name(&input.name)?;
        if let Some(upload) = &input.cover {
            upload.ensure_image()?;
        }

        let cover = match &input.cover {
            Some(upload) => {
                let key = container_cover_key(upload);
                self.storage.write(&key, upload.data.clone()).await?;
                Some(key)
            }
            None => None,
        };

        let created = self
            .containers
            .create(&CreateContainer {
                name,
                icon: input.icon,
                color: input.color,
                cover: cover.clone(),
            })
            .await;

        match created {
            Ok(container) => {
                info!(container_id = %container.id, name = %container.name, "Container created");
                Ok(container)
            }
            Err(e) => {
                if let Some(key) = cover {
                    self.delete_attachment(&key).await;
                }
                Err(e)
            }
        }
    }

    /// Update name, icon, color, and optionally the cover.
    pub async fn update(&self, id: Uuid, input: SaveContainer) -> AppResult<Container> {
        let mut container = self.get(id).await?;
        container.name = required_name(&input.name)?;
        container.icon = input.icon;
        container.color = input.color;

        let old_cover = container.cover.clone();
        let new_cover = match &input.cover {
            Some(upload) => {
                upload.ensure_image()?;
                let key = container_cover_key(upload);
                self.storage.write(&key, upload.data.clone()).await?;
                Some(key)
            }
            None => None,
        };
        if new_cover.is_some() {
            container.cover = new_cover.clone();
        } else if input.remove_cover {
            container.cover = None;
        }

        let container = match self.containers.update(&container).await {
            Ok(container) => container,
            Err(e) => {
                if let Some(key) = &new_cover {
                    self.delete_attachment(key).await;
                }
                return Err(e);
            }
        };

        if let Some(old) = old_cover
            && container.cover.as_deref() != Some(old.as_str())
        {
            self.delete_attachment(&old).await;
        }

        info!(container_id = %id, "Container updated");
        Ok(container)
    }

    /// Delete a container with everything in it.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let container = self.get(id).await?;
        let images = self
            .entries
            .list_joined(
                EntryKind::Image,
                &[FilterField::eq("base_entry.container", id)],
                &[],
            )
            .await?;

        if !self.containers.delete(id).await? {
            return Err(AppError::not_found(format!("Container {id} not found")));
        }

        let keys = images
            .iter()
            .filter_map(|j| j.child.payload.image_path())
            .chain(container.cover.as_deref());
        for key in keys {
            self.delete_attachment(key).await;
        }

        info!(container_id = %id, "Container deleted");
        Ok(())
    }

    /// Flip the pinned flag.
    pub async fn toggle_pin(&self, id: Uuid) -> AppResult<Container> {
        let mut container = self.get(id).await?;
        container.pinned = !container.pinned;
        let container = self.containers.update(&container).await?;
        info!(container_id = %id, pinned = container.pinned, "Container pin toggled");
        Ok(container)
    }

    /// Flip the hidden flag. Hiding also unpins.
    pub async fn toggle_hide(&self, id: Uuid) -> AppResult<Container> {
        let mut container = self.get(id).await?;
        container.hidden = !container.hidden;
        if container.hidden {
            container.pinned = false;
        }
        let container = self.containers.update(&container).await?;
        info!(container_id = %id, hidden = container.hidden, "Container visibility toggled");
        Ok(container)
    }

    /// Cover image bytes and MIME type.
    pub async fn cover(&self, id: Uuid) -> AppResult<(Bytes, &'static str)> {
        let container = self.get(id).await?;
        let key = container
            .cover
            .ok_or_else(|| AppError::not_found(format!("Container {id} has no cover")))?;
        let data = self.storage.read_bytes(&key).await?;
        Ok((data, mime_from_path(&key).unwrap_or("application/octet-stream")))
    }

    async fn counts(&self, id: Uuid) -> AppResult<EntryCounts> {
        let mut counts = EntryCounts::default();
        for kind in EntryKind::ALL {
            let n = self
                .entries
                .count(&[
                    FilterField::eq("container", id),
                    FilterField::eq("archived", false),
                    FilterField::eq("type", kind.as_str()),
                ])
                .await?;
            match kind {
                EntryKind::Text => counts.text_count = n,
                EntryKind::Link => counts.link_count = n,
                EntryKind::Image => counts.image_count = n,
            }
        }
        Ok(counts)
    }

    async fn delete_attachment(&self, key: &str) {
        if let Err(e) = self.storage.delete(key).await {
            warn!(key, error = %e, "Failed to delete container attachment");
        }
    }
}
