//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use ideabox_core::types::{FieldSource, FilterValue};

/// A node in a container's folder forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// The container this folder belongs to.
    pub container_id: Uuid,
    /// Parent folder ID (null for folders at the container root).
    pub parent_id: Option<Uuid>,
    /// Folder name. Siblings may share a name.
    pub name: String,
    /// Icon identifier.
    pub icon: String,
    /// Accent color.
    pub color: String,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this folder sits at its container's root.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

impl FieldSource for Folder {
    fn field(&self, name: &str) -> Option<FilterValue> {
        match name {
            "id" => Some(self.id.into()),
            "container" => Some(self.container_id.into()),
            "parent" => Some(self.parent_id.into()),
            "name" => Some(self.name.as_str().into()),
            "created" => Some(self.created_at.into()),
            _ => None,
        }
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// The owning container.
    pub container_id: Uuid,
    /// Parent folder (None for the container root).
    pub parent_id: Option<Uuid>,
    /// Folder name.
    pub name: String,
    /// Icon identifier.
    pub icon: String,
    /// Accent color.
    pub color: String,
}
