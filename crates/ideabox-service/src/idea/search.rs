//! Recursive search across a folder subtree.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use ideabox_core::error::AppError;
use ideabox_core::result::AppResult;
use ideabox_core::types::{FilterField, SortField};
use ideabox_database::{EntryStore, FolderStore, Stores};
use ideabox_entity::folder::Folder;
use ideabox_entity::search::SearchHit;

use super::fetch_ideas;
use crate::path::PathResolver;

/// Search request parameters.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct SearchQuery {
    /// Container to search in.
    pub container_id: Uuid,
    /// Folder to start from (None for the container root).
    pub folder_id: Option<Uuid>,
    /// Case-insensitive substring. Empty matches every idea.
    pub query: String,
    /// Comma-separated tag names; an idea must carry all of them.
    pub tags: Option<String>,
}

impl SearchQuery {
    fn tag_filters(&self) -> Vec<FilterField> {
        self.tags
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(|tag| FilterField::contains("base_entry.tags", tag))
            .collect()
    }
}

/// Depth-first search over a folder subtree.
#[derive(Debug, Clone)]
pub struct SearchService {
    /// Entry store.
    entries: Arc<dyn EntryStore>,
    /// Folder store.
    folders: Arc<dyn FolderStore>,
    /// Path resolver.
    resolver: Arc<PathResolver>,
}

impl SearchService {
    /// Creates a new search service.
    pub fn new(stores: &Stores, resolver: Arc<PathResolver>) -> Self {
        Self {
            entries: Arc::clone(&stores.entries),
            folders: Arc::clone(&stores.folders),
            resolver,
        }
    }

    /// Search the start folder and everything below it.
    ///
    /// Folders are visited in pre-order with siblings sorted by name. Hits
    /// within one folder are in listing order and carry the folder ids
    /// walked from the start folder down to the folder holding them.
    pub async fn search(&self, request: &SearchQuery) -> AppResult<Vec<SearchHit>> {
        let container_id = request.container_id;
        self.resolver.require_container(container_id).await?;

        let start = match request.folder_id {
            Some(id) => {
                let folder = self.resolver.require_existing_folder(id).await?;
                if folder.container_id != container_id {
                    return Err(AppError::invalid_path("Invalid path"));
                }
                Some(folder)
            }
            None => None,
        };

        let query = request.query.trim();
        let tag_filters = request.tag_filters();
        let mut hits = Vec::new();
        let mut visited = HashSet::new();
        let mut stack: Vec<(Option<Folder>, Vec<Uuid>)> = vec![(start, Vec::new())];

        while let Some((folder, trail)) = stack.pop() {
            let folder_id = folder.as_ref().map(|f| f.id);
            if let Some(id) = folder_id
                && !visited.insert(id)
            {
                return Err(AppError::integrity(format!(
                    "Folder {id} was reached twice while searching"
                )));
            }

            let mut filters = vec![
                FilterField::eq("base_entry.container", container_id),
                FilterField::eq("base_entry.archived", false),
                FilterField::eq("base_entry.folder", folder_id),
            ];
            filters.extend(tag_filters.iter().cloned());

            for idea in fetch_ideas(self.entries.as_ref(), &filters, query).await? {
                hits.push(SearchHit {
                    idea,
                    full_path: trail.clone(),
                    folder: folder.clone(),
                });
            }

            let children = self
                .folders
                .list(
                    &[
                        FilterField::eq("container", container_id),
                        FilterField::eq("parent", folder_id),
                    ],
                    &[SortField::asc("name")],
                )
                .await?;

            // Reversed so the first child by name is popped first.
            for child in children.into_iter().rev() {
                let mut child_trail = trail.clone();
                child_trail.push(child.id);
                stack.push((Some(child), child_trail));
            }
        }

        debug!(
            container_id = %container_id,
            folders = visited.len(),
            hits = hits.len(),
            "Search finished"
        );
        Ok(hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_filters_split_and_trim() {
        let query = SearchQuery {
            tags: Some(" x, ,y ".into()),
            ..Default::default()
        };
        let filters = query.tag_filters();
        assert_eq!(filters.len(), 2);
        assert_eq!(filters[0], FilterField::contains("base_entry.tags", "x"));
        assert_eq!(filters[1], FilterField::contains("base_entry.tags", "y"));

        assert!(SearchQuery::default().tag_filters().is_empty());
    }
}
