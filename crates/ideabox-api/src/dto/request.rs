//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use ideabox_core::error::AppError;
use ideabox_core::result::AppResult;

/// Run `validator` checks and map failures to a validation error.
pub fn validated<T: Validate>(req: T) -> AppResult<T> {
    req.validate()
        .map_err(|e| AppError::validation(format!("Invalid request: {e}")))?;
    Ok(req)
}

/// Create folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Owning container.
    pub container_id: Uuid,
    /// Parent folder (omit for the container root).
    pub parent_id: Option<Uuid>,
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    /// Icon identifier.
    #[serde(default)]
    #[validate(length(max = 64))]
    pub icon: String,
    /// Hex color.
    #[serde(default)]
    #[validate(length(max = 32))]
    pub color: String,
}

/// Update folder request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    /// Icon identifier.
    #[serde(default)]
    #[validate(length(max = 64))]
    pub icon: String,
    /// Hex color.
    #[serde(default)]
    #[validate(length(max = 32))]
    pub color: String,
}

/// Move a folder or idea into a folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveRequest {
    /// Destination folder.
    pub target_id: Uuid,
}

/// Create tag request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTagRequest {
    /// Owning container.
    pub container_id: Uuid,
    /// Tag name.
    #[validate(length(min = 1, max = 64, message = "Name is required"))]
    pub name: String,
    /// Icon identifier.
    #[serde(default)]
    #[validate(length(max = 64))]
    pub icon: String,
    /// Hex color.
    #[serde(default)]
    #[validate(length(max = 32))]
    pub color: String,
}

/// Update tag request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateTagRequest {
    /// Tag name.
    #[validate(length(min = 1, max = 64, message = "Name is required"))]
    pub name: String,
    /// Icon identifier.
    #[serde(default)]
    #[validate(length(max = 64))]
    pub icon: String,
    /// Hex color.
    #[serde(default)]
    #[validate(length(max = 32))]
    pub color: String,
}

/// `GET /api/containers` query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContainerListQuery {
    /// Include hidden containers.
    #[serde(default)]
    pub include_hidden: bool,
}

/// `GET /api/folders` query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderListQuery {
    /// Container to list in.
    pub container: Uuid,
    /// `/`-separated folder ids from the root; empty for the root.
    #[serde(default)]
    pub path: String,
}

/// `GET /api/ideas` query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdeaListQuery {
    /// Container to list in.
    pub container: Uuid,
    /// `/`-separated folder ids from the root; empty for the root.
    #[serde(default)]
    pub path: String,
    /// List archived ideas instead of active ones.
    #[serde(default)]
    pub archived: bool,
}

/// `GET /api/tags` query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagListQuery {
    /// Container whose tags to list.
    pub container: Uuid,
}

/// `GET /api/path` query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathDetailsQuery {
    /// Container the folder lives in.
    pub container: Uuid,
    /// Target folder; omit for the root.
    pub folder: Option<Uuid>,
}

/// `GET /api/path/valid` query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathValidQuery {
    /// Container to resolve in.
    pub container: Uuid,
    /// `/`-separated folder ids.
    #[serde(default)]
    pub path: String,
}

/// `GET /api/search` query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    /// Container to search in.
    pub container: Uuid,
    /// Search text; empty matches every idea.
    #[serde(default)]
    pub q: String,
    /// Comma-separated tag names.
    pub tags: Option<String>,
    /// Folder to start from.
    pub folder: Option<Uuid>,
}
