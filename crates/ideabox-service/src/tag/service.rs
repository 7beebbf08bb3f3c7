//! Tag CRUD with usage counts.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use ideabox_core::error::AppError;
use ideabox_core::result::AppResult;
use ideabox_core::types::{FilterField, SortField};
use ideabox_database::{EntryStore, Stores, TagStore};
use ideabox_entity::tag::{CreateTag, Tag, TagSummary};

use crate::folder::service::required_name;
use crate::path::PathResolver;

/// Data for creating or updating a tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveTag {
    /// Tag name, unique within its container.
    pub name: String,
    /// Icon identifier.
    pub icon: String,
    /// Hex color.
    pub color: String,
}

/// Manages per-container tags.
#[derive(Debug, Clone)]
pub struct TagService {
    /// Tag store.
    tags: Arc<dyn TagStore>,
    /// Entry store (for usage counts).
    entries: Arc<dyn EntryStore>,
    /// Path resolver (container checks).
    resolver: Arc<PathResolver>,
}

impl TagService {
    /// Creates a new tag service.
    pub fn new(stores: &Stores, resolver: Arc<PathResolver>) -> Self {
        Self {
            tags: Arc::clone(&stores.tags),
            entries: Arc::clone(&stores.entries),
            resolver,
        }
    }

    /// Tags of a container with the number of non-archived ideas using
    /// each, most used first.
    pub async fn list(&self, container_id: Uuid) -> AppResult<Vec<TagSummary>> {
        self.resolver.require_container(container_id).await?;

        let tags = self
            .tags
            .list(
                &[FilterField::eq("container", container_id)],
                &[SortField::asc("name")],
            )
            .await?;

        let mut summaries = Vec::with_capacity(tags.len());
        for tag in tags {
            let amount = self
                .entries
                .count(&[
                    FilterField::eq("container", container_id),
                    FilterField::eq("archived", false),
                    FilterField::contains("tags", tag.name.clone()),
                ])
                .await?;
            summaries.push(TagSummary { tag, amount });
        }

        // Stable, so equal amounts stay in name order.
        summaries.sort_by(|a, b| b.amount.cmp(&a.amount));
        Ok(summaries)
    }

    /// Create a tag in a container.
    pub async fn create(&self, container_id: Uuid, input: SaveTag) -> AppResult<Tag> {
        self.resolver.require_container(container_id).await?;

        let tag = self
            .tags
            .create(&CreateTag {
                container_id,
                name: required_name(&input.name)?,
                icon: input.icon,
                color: input.color,
            })
            .await?;

        info!(tag_id = %tag.id, container_id = %container_id, "Tag created");
        Ok(tag)
    }

    /// Rename or restyle a tag. Ideas keep the tag names they were saved with.
    pub async fn update(&self, id: Uuid, input: SaveTag) -> AppResult<Tag> {
        let mut tag = self.require_tag(id).await?;
        tag.name = required_name(&input.name)?;
        tag.icon = input.icon;
        tag.color = input.color;

        let tag = self.tags.update(&tag).await?;
        info!(tag_id = %id, "Tag updated");
        Ok(tag)
    }

    /// Delete a tag.
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.tags.delete(id).await? {
            return Err(AppError::not_found(format!("Tag {id} not found")));
        }
        info!(tag_id = %id, "Tag deleted");
        Ok(())
    }

    async fn require_tag(&self, id: Uuid) -> AppResult<Tag> {
        self.tags
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tag {id} not found")))
    }
}
