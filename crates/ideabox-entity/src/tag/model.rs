//! Tag entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use ideabox_core::types::{FieldSource, FilterValue};

/// A per-container label. Entries reference tags by name only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Tag {
    /// Unique tag identifier.
    pub id: Uuid,
    /// The container the tag belongs to.
    pub container_id: Uuid,
    /// Tag name, unique within its container.
    pub name: String,
    /// Icon identifier.
    pub icon: String,
    /// Accent color.
    pub color: String,
    /// When the tag was created.
    pub created_at: DateTime<Utc>,
    /// When the tag was last updated.
    pub updated_at: DateTime<Utc>,
}

impl FieldSource for Tag {
    fn field(&self, name: &str) -> Option<FilterValue> {
        match name {
            "id" => Some(self.id.into()),
            "container" => Some(self.container_id.into()),
            "name" => Some(self.name.as_str().into()),
            _ => None,
        }
    }
}

/// Data required to create a new tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTag {
    /// The owning container.
    pub container_id: Uuid,
    /// Tag name.
    pub name: String,
    /// Icon identifier.
    pub icon: String,
    /// Accent color.
    pub color: String,
}

/// A tag with the number of live entries carrying its name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagSummary {
    /// The tag record.
    #[serde(flatten)]
    pub tag: Tag,
    /// Count of non-archived entries in the container tagged with this name.
    pub amount: u64,
}
