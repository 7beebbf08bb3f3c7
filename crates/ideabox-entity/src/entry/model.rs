//! Entry base record and typed child records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use ideabox_core::types::{FieldSource, FilterValue};

use super::kind::EntryKind;

/// The type-agnostic part of an idea.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Entry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// The owning container.
    pub container_id: Uuid,
    /// The containing folder (None at the container root).
    pub folder_id: Option<Uuid>,
    /// Which child table holds the payload.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Free-form tag names.
    pub tags: Vec<String>,
    /// Pinned entries sort first.
    pub pinned: bool,
    /// Archived entries are left out of default listings.
    pub archived: bool,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// When the entry was last updated.
    pub updated_at: DateTime<Utc>,
}

impl FieldSource for Entry {
    fn field(&self, name: &str) -> Option<FilterValue> {
        match name {
            "id" => Some(self.id.into()),
            "container" => Some(self.container_id.into()),
            "folder" => Some(self.folder_id.into()),
            "type" => Some(self.kind.as_str().into()),
            "tags" => Some(self.tags.clone().into()),
            "pinned" => Some(self.pinned.into()),
            "archived" => Some(self.archived.into()),
            "created" => Some(self.created_at.into()),
            "updated" => Some(self.updated_at.into()),
            _ => None,
        }
    }
}

/// Data required to insert a base record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEntry {
    /// The owning container.
    pub container_id: Uuid,
    /// The containing folder.
    pub folder_id: Option<Uuid>,
    /// The entry kind.
    pub kind: EntryKind,
    /// Tag names.
    pub tags: Vec<String>,
}

/// The type-specific part of an idea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EntryPayload {
    /// Text snippet.
    Text {
        /// The snippet.
        content: String,
    },
    /// Bookmarked URL.
    Link {
        /// The URL.
        link: String,
    },
    /// Uploaded image.
    Image {
        /// Storage path of the image attachment.
        image: String,
    },
}

impl EntryPayload {
    /// The kind this payload belongs to.
    pub fn kind(&self) -> EntryKind {
        match self {
            Self::Text { .. } => EntryKind::Text,
            Self::Link { .. } => EntryKind::Link,
            Self::Image { .. } => EntryKind::Image,
        }
    }

    /// The image attachment path, for image payloads.
    pub fn image_path(&self) -> Option<&str> {
        match self {
            Self::Image { image } => Some(image),
            _ => None,
        }
    }
}

/// A row of one of the three child tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildRecord {
    /// Child row identifier.
    pub id: Uuid,
    /// The base record this child belongs to.
    pub base_entry: Uuid,
    /// The payload.
    pub payload: EntryPayload,
}

/// A child row with its base record expanded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinedEntry {
    /// The child row.
    pub child: ChildRecord,
    /// The base record referenced by `child.base_entry`.
    pub base: Entry,
}

impl FieldSource for JoinedEntry {
    fn field(&self, name: &str) -> Option<FilterValue> {
        if let Some(base_field) = name.strip_prefix("base_entry.") {
            return self.base.field(base_field);
        }
        match (name, &self.child.payload) {
            ("id", _) => Some(self.child.id.into()),
            ("base_entry", _) => Some(self.child.base_entry.into()),
            ("content", EntryPayload::Text { content }) => Some(content.as_str().into()),
            ("link", EntryPayload::Link { link }) => Some(link.as_str().into()),
            ("image", EntryPayload::Image { image }) => Some(image.as_str().into()),
            _ => None,
        }
    }
}
