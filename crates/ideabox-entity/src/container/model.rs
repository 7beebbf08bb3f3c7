//! Container entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use ideabox_core::types::{FieldSource, FilterValue};

/// A top-level board owning folders, entries, and tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Container {
    /// Unique container identifier.
    pub id: Uuid,
    /// Display name, unique across all containers.
    pub name: String,
    /// Icon identifier.
    pub icon: String,
    /// Accent color.
    pub color: String,
    /// Storage path of the cover image, if any.
    pub cover: Option<String>,
    /// Pinned containers sort first.
    pub pinned: bool,
    /// Hidden containers are left out of default listings.
    pub hidden: bool,
    /// When the container was created.
    pub created_at: DateTime<Utc>,
    /// When the container was last updated.
    pub updated_at: DateTime<Utc>,
}

impl FieldSource for Container {
    fn field(&self, name: &str) -> Option<FilterValue> {
        match name {
            "id" => Some(self.id.into()),
            "name" => Some(self.name.as_str().into()),
            "pinned" => Some(self.pinned.into()),
            "hidden" => Some(self.hidden.into()),
            "created" => Some(self.created_at.into()),
            _ => None,
        }
    }
}

/// Data required to create a new container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContainer {
    /// Display name.
    pub name: String,
    /// Icon identifier.
    pub icon: String,
    /// Accent color.
    pub color: String,
    /// Storage path of an already stored cover image.
    pub cover: Option<String>,
}

/// Non-archived entry counts of a container, by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryCounts {
    /// Number of text entries.
    pub text_count: u64,
    /// Number of link entries.
    pub link_count: u64,
    /// Number of image entries.
    pub image_count: u64,
}

/// A container together with its entry counts, as shown in listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerSummary {
    /// The container record.
    #[serde(flatten)]
    pub container: Container,
    /// Entry counts.
    #[serde(flatten)]
    pub counts: EntryCounts,
}
