//! Derived path values. Paths are never stored; they are recomputed from
//! parent pointers on every request.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ideabox_core::error::AppError;
use ideabox_core::result::AppResult;

use super::model::Folder;
use crate::container::Container;

/// Why a path segment broke the parent chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidSegment {
    /// No folder with this id exists.
    Missing,
    /// The folder's parent is not the previous segment.
    ParentMismatch,
    /// The folder belongs to another container.
    ContainerMismatch,
}

/// Outcome of resolving a root-to-leaf sequence of folder ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathResolution {
    /// Every segment chained correctly. `terminal` is `None` for the root.
    Valid {
        /// The last folder of the path.
        terminal: Option<Uuid>,
    },
    /// Resolution stopped at `segment`.
    Invalid {
        /// The first offending folder id.
        segment: Uuid,
        /// What was wrong with it.
        reason: InvalidSegment,
    },
}

impl PathResolution {
    /// Whether the path is valid.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }
}

/// A container plus the root-to-target sequence of folders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathDetails {
    /// The container the path lives in.
    pub container: Container,
    /// Folders from the container root down to the target, inclusive.
    pub route: Vec<Folder>,
}

/// Split a `/`-separated path into folder ids, skipping empty segments.
pub fn parse_path_segments(path: &str) -> AppResult<Vec<Uuid>> {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            Uuid::parse_str(segment)
                .map_err(|_| AppError::invalid_path(format!("Malformed path segment \"{segment}\"")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_empty_segments() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let parsed = parse_path_segments(&format!("/{a}//{b}/")).unwrap();
        assert_eq!(parsed, vec![a, b]);
        assert!(parse_path_segments("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_path_segments("not-a-folder").unwrap_err();
        assert_eq!(err.kind, ideabox_core::error::ErrorKind::InvalidPath);
    }
}
