//! Idea CRUD: splitting writes into base + child records and assembling
//! reads back into [`Idea`]s.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use ideabox_core::error::AppError;
use ideabox_core::result::AppResult;
use ideabox_core::traits::storage::StorageProvider;
use ideabox_core::types::FilterField;
use ideabox_database::{EntryStore, Stores};
use ideabox_entity::entry::{CreateEntry, Entry, EntryKind, EntryPayload, Idea};
use ideabox_storage::mime_from_path;

use super::fetch_ideas;
use crate::attachment::{Upload, idea_image_key};
use crate::path::PathResolver;

/// Data for creating an idea.
#[derive(Debug, Clone)]
pub struct CreateIdea {
    /// Owning container.
    pub container_id: Uuid,
    /// Target folder (None for the container root).
    pub folder_id: Option<Uuid>,
    /// Idea kind.
    pub kind: EntryKind,
    /// Tag names.
    pub tags: Vec<String>,
    /// Text content (text ideas).
    pub content: Option<String>,
    /// URL (link ideas).
    pub link: Option<String>,
    /// Image file (image ideas).
    pub image: Option<Upload>,
}

/// Data for updating an idea. The kind must match the stored kind.
#[derive(Debug, Clone)]
pub struct UpdateIdea {
    /// Idea kind.
    pub kind: EntryKind,
    /// Tag names.
    pub tags: Vec<String>,
    /// Text content (text ideas).
    pub content: Option<String>,
    /// URL (link ideas).
    pub link: Option<String>,
    /// Replacement image (required for image ideas).
    pub image: Option<Upload>,
}

/// A validated payload, before any image has been written.
enum PendingPayload {
    Ready(EntryPayload),
    Image(Upload),
}

impl PendingPayload {
    fn validate(
        kind: EntryKind,
        content: Option<String>,
        link: Option<String>,
        image: Option<Upload>,
    ) -> AppResult<Self> {
        match kind {
            EntryKind::Text => {
                let content = content
                    .filter(|c| !c.trim().is_empty())
                    .ok_or_else(|| AppError::validation("Content is required for text ideas"))?;
                Ok(Self::Ready(EntryPayload::Text { content }))
            }
            EntryKind::Link => {
                let link = link
                    .map(|l| l.trim().to_string())
                    .filter(|l| !l.is_empty())
                    .ok_or_else(|| AppError::validation("Link is required for link ideas"))?;
                Ok(Self::Ready(EntryPayload::Link { link }))
            }
            EntryKind::Image => {
                let image = image
                    .ok_or_else(|| AppError::validation("Image is required for image entries"))?;
                image.ensure_image()?;
                Ok(Self::Image(image))
            }
        }
    }
}

/// Trim tag names, drop empty ones, and remove duplicates (first wins).
pub(crate) fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    }
    out
}

/// Creates, reads, and mutates ideas.
#[derive(Debug, Clone)]
pub struct IdeaService {
    /// Entry store.
    entries: Arc<dyn EntryStore>,
    /// Path resolver.
    resolver: Arc<PathResolver>,
    /// Attachment storage for image ideas.
    storage: Arc<dyn StorageProvider>,
}

impl IdeaService {
    /// Creates a new idea service.
    pub fn new(
        stores: &Stores,
        resolver: Arc<PathResolver>,
        storage: Arc<dyn StorageProvider>,
    ) -> Self {
        Self {
            entries: Arc::clone(&stores.entries),
            resolver,
            storage,
        }
    }

    /// List the ideas directly inside the folder `path` points at.
    pub async fn list(&self, container_id: Uuid, path: &str, archived: bool) -> AppResult<Vec<Idea>> {
        let folder = self.resolver.require_folder(container_id, path).await?;

        let filters = [
            FilterField::eq("base_entry.container", container_id),
            FilterField::eq("base_entry.archived", archived),
            FilterField::eq("base_entry.folder", folder),
        ];
        fetch_ideas(self.entries.as_ref(), &filters, "").await
    }

    /// Get a single idea.
    pub async fn get(&self, id: Uuid) -> AppResult<Idea> {
        let base = self.require_entry(id).await?;
        self.assemble(base).await
    }

    /// Create an idea: base record first, then its child record.
    ///
    /// If the child cannot be written the base record and any stored image
    /// are removed again.
    pub async fn create(&self, input: CreateIdea) -> AppResult<Idea> {
        let pending = PendingPayload::validate(input.kind, input.content, input.link, input.image)?;

        self.resolver.require_container(input.container_id).await?;
        if let Some(folder_id) = input.folder_id {
            let folder = self.resolver.require_existing_folder(folder_id).await?;
            if folder.container_id != input.container_id {
                return Err(AppError::invalid_path(format!(
                    "Folder {folder_id} does not belong to container {}",
                    input.container_id
                )));
            }
        }

        let base = self
            .entries
            .create(&CreateEntry {
                container_id: input.container_id,
                folder_id: input.folder_id,
                kind: input.kind,
                tags: normalize_tags(input.tags),
            })
            .await?;

        let payload = match pending {
            PendingPayload::Ready(payload) => payload,
            PendingPayload::Image(upload) => {
                let key = idea_image_key(base.id, &upload);
                if let Err(e) = self.storage.write(&key, upload.data).await {
                    self.discard(base.id, None).await;
                    return Err(e);
                }
                EntryPayload::Image { image: key }
            }
        };

        let child = match self.entries.insert_child(base.id, &payload).await {
            Ok(child) => child,
            Err(e) => {
                warn!(idea_id = %base.id, error = %e, "Child insert failed, removing base record");
                self.discard(base.id, payload.image_path()).await;
                return Err(e);
            }
        };

        info!(idea_id = %base.id, kind = %base.kind, container_id = %base.container_id, "Idea created");
        Idea::assemble(base, child.payload)
    }

    /// Update tags and payload. Image ideas need a fresh image, which
    /// replaces the stored one.
    pub async fn update(&self, id: Uuid, input: UpdateIdea) -> AppResult<Idea> {
        let mut base = self.require_entry(id).await?;
        if base.kind != input.kind {
            return Err(AppError::validation(format!(
                "Invalid idea type: a {} idea cannot become a {} idea",
                base.kind, input.kind
            )));
        }
        let pending = PendingPayload::validate(input.kind, input.content, input.link, input.image)?;
        let mut child = self.require_child(&base).await?;
        let old_image = child.payload.image_path().map(str::to_string);

        let payload = match pending {
            PendingPayload::Ready(payload) => payload,
            PendingPayload::Image(upload) => {
                let key = idea_image_key(id, &upload);
                self.storage.write(&key, upload.data).await?;
                EntryPayload::Image { image: key }
            }
        };
        let new_image = payload.image_path().map(str::to_string);

        let original = base.clone();
        base.tags = normalize_tags(input.tags);
        child.payload = payload;
        let written = match self.entries.update(&base).await {
            Ok(base) => match self.entries.update_child(&child).await {
                Ok(child) => Ok((base, child)),
                Err(e) => {
                    warn!(idea_id = %id, error = %e, "Child update failed, restoring base record");
                    if let Err(restore) = self.entries.update(&original).await {
                        warn!(idea_id = %id, error = %restore, "Failed to restore base record");
                    }
                    Err(e)
                }
            },
            Err(e) => Err(e),
        };
        let (base, child) = match written {
            Ok(pair) => pair,
            Err(e) => {
                if let Some(key) = new_image {
                    self.delete_attachment(&key).await;
                }
                return Err(e);
            }
        };

        if let Some(old) = old_image {
            self.delete_attachment(&old).await;
        }

        info!(idea_id = %id, "Idea updated");
        Idea::assemble(base, child.payload)
    }

    /// Delete an idea and its image, if any.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let base = self.require_entry(id).await?;
        let image = match base.kind {
            EntryKind::Image => self
                .entries
                .find_child(EntryKind::Image, id)
                .await?
                .and_then(|child| child.payload.image_path().map(str::to_string)),
            _ => None,
        };

        if !self.entries.delete(id).await? {
            return Err(AppError::not_found(format!("Idea {id} not found")));
        }
        if let Some(key) = image {
            self.delete_attachment(&key).await;
        }

        info!(idea_id = %id, "Idea deleted");
        Ok(())
    }

    /// Flip the pinned flag.
    pub async fn toggle_pin(&self, id: Uuid) -> AppResult<Idea> {
        let mut base = self.require_entry(id).await?;
        base.pinned = !base.pinned;
        let base = self.entries.update(&base).await?;

        info!(idea_id = %id, pinned = base.pinned, "Idea pin toggled");
        self.assemble(base).await
    }

    /// Flip the archived flag. Archiving always unpins.
    pub async fn toggle_archive(&self, id: Uuid) -> AppResult<Idea> {
        let mut base = self.require_entry(id).await?;
        base.archived = !base.archived;
        base.pinned = false;
        let base = self.entries.update(&base).await?;

        info!(idea_id = %id, archived = base.archived, "Idea archive toggled");
        self.assemble(base).await
    }

    /// Move an idea into another folder of the same container.
    pub async fn move_to(&self, id: Uuid, target: Uuid) -> AppResult<Idea> {
        let mut base = self.require_entry(id).await?;
        let folder = self.resolver.require_existing_folder(target).await?;
        if folder.container_id != base.container_id {
            return Err(AppError::validation(
                "Target folder belongs to another container",
            ));
        }

        base.folder_id = Some(target);
        let base = self.entries.update(&base).await?;

        info!(idea_id = %id, folder_id = %target, "Idea moved");
        self.assemble(base).await
    }

    /// Move an idea up into the parent of its current folder.
    pub async fn remove_from_parent(&self, id: Uuid) -> AppResult<Idea> {
        let mut base = self.require_entry(id).await?;
        let Some(folder_id) = base.folder_id else {
            return Err(AppError::validation("Idea is not in any folder"));
        };
        let folder = self
            .resolver
            .require_existing_folder(folder_id)
            .await
            .map_err(|_| AppError::validation("Current folder does not exist"))?;

        base.folder_id = folder.parent_id;
        let base = self.entries.update(&base).await?;

        info!(idea_id = %id, "Idea moved to parent folder");
        self.assemble(base).await
    }

    /// The stored image of an image idea, with its content type.
    pub async fn image(&self, id: Uuid) -> AppResult<(Bytes, &'static str)> {
        let base = self.require_entry(id).await?;
        if base.kind != EntryKind::Image {
            return Err(AppError::not_found(format!("Idea {id} has no image")));
        }
        let child = self.require_child(&base).await?;
        let key = child
            .payload
            .image_path()
            .ok_or_else(|| AppError::integrity(format!("Idea {id} has no image payload")))?;

        let data = self.storage.read_bytes(key).await?;
        Ok((data, mime_from_path(key).unwrap_or("application/octet-stream")))
    }

    async fn require_entry(&self, id: Uuid) -> AppResult<Entry> {
        self.entries
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Idea {id} not found")))
    }

    async fn require_child(&self, base: &Entry) -> AppResult<ideabox_entity::entry::ChildRecord> {
        self.entries
            .find_child(base.kind, base.id)
            .await?
            .ok_or_else(|| {
                AppError::integrity(format!("Idea {} has no {} record", base.id, base.kind))
            })
    }

    async fn assemble(&self, base: Entry) -> AppResult<Idea> {
        let child = self.require_child(&base).await?;
        Idea::assemble(base, child.payload)
    }

    /// Best-effort removal of a half-created idea.
    async fn discard(&self, id: Uuid, image: Option<&str>) {
        if let Err(e) = self.entries.delete(id).await {
            warn!(idea_id = %id, error = %e, "Failed to remove orphaned base record");
        }
        if let Some(key) = image {
            self.delete_attachment(key).await;
        }
    }

    async fn delete_attachment(&self, key: &str) {
        if let Err(e) = self.storage.delete(key).await {
            warn!(key, error = %e, "Failed to delete idea image");
        }
    }
}
