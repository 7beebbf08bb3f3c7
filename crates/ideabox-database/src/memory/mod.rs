//! In-memory record store.
//!
//! Every table is a `BTreeMap` keyed by a time-ordered UUID, so iteration
//! follows insertion order. Filters and sorts are evaluated through the
//! [`FieldSource`](ideabox_core::types::FieldSource) impls on the entities.
//! Cascading deletes and uniqueness rules mirror the PostgreSQL schema.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use ideabox_core::error::{AppError, ErrorKind};
use ideabox_core::result::AppResult;
use ideabox_core::types::{FilterField, SortField, matches_all, sort_records};
use ideabox_entity::container::{Container, CreateContainer};
use ideabox_entity::entry::{
    ChildRecord, CreateEntry, Entry, EntryKind, EntryPayload, JoinedEntry,
};
use ideabox_entity::folder::{CreateFolder, Folder};
use ideabox_entity::tag::{CreateTag, Tag};

use crate::store::{ContainerStore, EntryStore, FolderStore, TagStore};

#[derive(Debug, Default)]
struct MemoryState {
    containers: BTreeMap<Uuid, Container>,
    folders: BTreeMap<Uuid, Folder>,
    entries: BTreeMap<Uuid, Entry>,
    children: BTreeMap<Uuid, ChildRecord>,
    tags: BTreeMap<Uuid, Tag>,
}

impl MemoryState {
    fn remove_entries(&mut self, ids: &HashSet<Uuid>) {
        self.entries.retain(|id, _| !ids.contains(id));
        self.children.retain(|_, child| !ids.contains(&child.base_entry));
    }

    /// The folder and every folder below it.
    fn subtree(&self, root: Uuid) -> HashSet<Uuid> {
        let mut found = HashSet::from([root]);
        let mut frontier = vec![root];
        while let Some(current) = frontier.pop() {
            for folder in self.folders.values() {
                if folder.parent_id == Some(current) && found.insert(folder.id) {
                    frontier.push(folder.id);
                }
            }
        }
        found
    }

    fn child_of(&self, kind: EntryKind, base_entry: Uuid) -> Option<&ChildRecord> {
        self.children
            .values()
            .find(|child| child.base_entry == base_entry && child.payload.kind() == kind)
    }
}

/// A record store that keeps everything in process memory.
///
/// Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn filter_sorted<T, I>(rows: I, filters: &[FilterField], sort: &[SortField]) -> AppResult<Vec<T>>
where
    T: ideabox_core::types::FieldSource + Clone,
    I: Iterator<Item = T>,
{
    let mut out = Vec::new();
    for row in rows {
        if matches_all(&row, filters)? {
            out.push(row);
        }
    }
    sort_records(&mut out, sort)?;
    Ok(out)
}

fn missing_reference(what: &str, id: Uuid) -> AppError {
    AppError::new(
        ErrorKind::Database,
        format!("Referenced {what} {id} does not exist"),
    )
}

#[async_trait]
impl ContainerStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Container>> {
        Ok(self.state.read().await.containers.get(&id).cloned())
    }

    async fn exists(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.state.read().await.containers.contains_key(&id))
    }

    async fn list(&self, filters: &[FilterField], sort: &[SortField]) -> AppResult<Vec<Container>> {
        let state = self.state.read().await;
        filter_sorted(state.containers.values().cloned(), filters, sort)
    }

    async fn create(&self, data: &CreateContainer) -> AppResult<Container> {
        let mut state = self.state.write().await;
        if state.containers.values().any(|c| c.name == data.name) {
            return Err(AppError::conflict(format!(
                "Container name '{}' already exists",
                data.name
            )));
        }

        let now = Utc::now();
        let container = Container {
            id: Uuid::now_v7(),
            name: data.name.clone(),
            icon: data.icon.clone(),
            color: data.color.clone(),
            cover: data.cover.clone(),
            pinned: false,
            hidden: false,
            created_at: now,
            updated_at: now,
        };
        state.containers.insert(container.id, container.clone());
        Ok(container)
    }

    async fn update(&self, container: &Container) -> AppResult<Container> {
        let mut state = self.state.write().await;
        if state
            .containers
            .values()
            .any(|c| c.id != container.id && c.name == container.name)
        {
            return Err(AppError::conflict(format!(
                "Container name '{}' already exists",
                container.name
            )));
        }

        let stored = state
            .containers
            .get_mut(&container.id)
            .ok_or_else(|| AppError::not_found(format!("Container {} not found", container.id)))?;
        stored.name = container.name.clone();
        stored.icon = container.icon.clone();
        stored.color = container.color.clone();
        stored.cover = container.cover.clone();
        stored.pinned = container.pinned;
        stored.hidden = container.hidden;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if state.containers.remove(&id).is_none() {
            return Ok(false);
        }

        state.folders.retain(|_, f| f.container_id != id);
        state.tags.retain(|_, t| t.container_id != id);
        let entries: HashSet<Uuid> = state
            .entries
            .values()
            .filter(|e| e.container_id == id)
            .map(|e| e.id)
            .collect();
        state.remove_entries(&entries);
        Ok(true)
    }
}

#[async_trait]
impl FolderStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        Ok(self.state.read().await.folders.get(&id).cloned())
    }

    async fn exists(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.state.read().await.folders.contains_key(&id))
    }

    async fn list(&self, filters: &[FilterField], sort: &[SortField]) -> AppResult<Vec<Folder>> {
        let state = self.state.read().await;
        filter_sorted(state.folders.values().cloned(), filters, sort)
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        let mut state = self.state.write().await;
        if !state.containers.contains_key(&data.container_id) {
            return Err(missing_reference("container", data.container_id));
        }
        if let Some(parent) = data.parent_id
            && !state.folders.contains_key(&parent)
        {
            return Err(missing_reference("folder", parent));
        }

        let now = Utc::now();
        let folder = Folder {
            id: Uuid::now_v7(),
            container_id: data.container_id,
            parent_id: data.parent_id,
            name: data.name.clone(),
            icon: data.icon.clone(),
            color: data.color.clone(),
            created_at: now,
            updated_at: now,
        };
        state.folders.insert(folder.id, folder.clone());
        Ok(folder)
    }

    async fn update(&self, folder: &Folder) -> AppResult<Folder> {
        let mut state = self.state.write().await;
        if let Some(parent) = folder.parent_id
            && !state.folders.contains_key(&parent)
        {
            return Err(missing_reference("folder", parent));
        }

        let stored = state
            .folders
            .get_mut(&folder.id)
            .ok_or_else(|| AppError::not_found(format!("Folder {} not found", folder.id)))?;
        stored.parent_id = folder.parent_id;
        stored.name = folder.name.clone();
        stored.icon = folder.icon.clone();
        stored.color = folder.color.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if !state.folders.contains_key(&id) {
            return Ok(false);
        }

        let subtree = state.subtree(id);
        state.folders.retain(|folder_id, _| !subtree.contains(folder_id));
        let entries: HashSet<Uuid> = state
            .entries
            .values()
            .filter(|e| e.folder_id.is_some_and(|f| subtree.contains(&f)))
            .map(|e| e.id)
            .collect();
        state.remove_entries(&entries);
        Ok(true)
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Entry>> {
        Ok(self.state.read().await.entries.get(&id).cloned())
    }

    async fn exists(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.state.read().await.entries.contains_key(&id))
    }

    async fn create(&self, data: &CreateEntry) -> AppResult<Entry> {
        let mut state = self.state.write().await;
        if !state.containers.contains_key(&data.container_id) {
            return Err(missing_reference("container", data.container_id));
        }
        if let Some(folder) = data.folder_id
            && !state.folders.contains_key(&folder)
        {
            return Err(missing_reference("folder", folder));
        }

        let now = Utc::now();
        let entry = Entry {
            id: Uuid::now_v7(),
            container_id: data.container_id,
            folder_id: data.folder_id,
            kind: data.kind,
            tags: data.tags.clone(),
            pinned: false,
            archived: false,
            created_at: now,
            updated_at: now,
        };
        state.entries.insert(entry.id, entry.clone());
        Ok(entry)
    }

    async fn update(&self, entry: &Entry) -> AppResult<Entry> {
        let mut state = self.state.write().await;
        if let Some(folder) = entry.folder_id
            && !state.folders.contains_key(&folder)
        {
            return Err(missing_reference("folder", folder));
        }

        let stored = state
            .entries
            .get_mut(&entry.id)
            .ok_or_else(|| AppError::not_found(format!("Idea {} not found", entry.id)))?;
        stored.folder_id = entry.folder_id;
        stored.tags = entry.tags.clone();
        stored.pinned = entry.pinned;
        stored.archived = entry.archived;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if !state.entries.contains_key(&id) {
            return Ok(false);
        }
        state.remove_entries(&HashSet::from([id]));
        Ok(true)
    }

    async fn count(&self, filters: &[FilterField]) -> AppResult<u64> {
        let state = self.state.read().await;
        let mut count = 0;
        for entry in state.entries.values() {
            if matches_all(entry, filters)? {
                count += 1;
            }
        }
        Ok(count)
    }

    async fn insert_child(&self, base_entry: Uuid, payload: &EntryPayload) -> AppResult<ChildRecord> {
        let mut state = self.state.write().await;
        let kind = payload.kind();
        if !state.entries.contains_key(&base_entry) {
            return Err(missing_reference("entry", base_entry));
        }
        if state.child_of(kind, base_entry).is_some() {
            return Err(AppError::new(
                ErrorKind::Database,
                format!("Entry {base_entry} already has a {kind} record"),
            ));
        }

        let child = ChildRecord {
            id: Uuid::now_v7(),
            base_entry,
            payload: payload.clone(),
        };
        state.children.insert(child.id, child.clone());
        Ok(child)
    }

    async fn find_child(&self, kind: EntryKind, base_entry: Uuid) -> AppResult<Option<ChildRecord>> {
        Ok(self.state.read().await.child_of(kind, base_entry).cloned())
    }

    async fn update_child(&self, child: &ChildRecord) -> AppResult<ChildRecord> {
        let mut state = self.state.write().await;
        let stored = state
            .children
            .get_mut(&child.id)
            .filter(|stored| stored.payload.kind() == child.payload.kind())
            .ok_or_else(|| {
                AppError::not_found(format!("{} entry {} not found", child.payload.kind(), child.id))
            })?;
        stored.payload = child.payload.clone();
        Ok(stored.clone())
    }

    async fn list_joined(
        &self,
        kind: EntryKind,
        filters: &[FilterField],
        sort: &[SortField],
    ) -> AppResult<Vec<JoinedEntry>> {
        let state = self.state.read().await;
        let joined = state
            .children
            .values()
            .filter(|child| child.payload.kind() == kind)
            .filter_map(|child| {
                state.entries.get(&child.base_entry).map(|base| JoinedEntry {
                    child: child.clone(),
                    base: base.clone(),
                })
            });
        filter_sorted(joined, filters, sort)
    }
}

#[async_trait]
impl TagStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Tag>> {
        Ok(self.state.read().await.tags.get(&id).cloned())
    }

    async fn list(&self, filters: &[FilterField], sort: &[SortField]) -> AppResult<Vec<Tag>> {
        let state = self.state.read().await;
        filter_sorted(state.tags.values().cloned(), filters, sort)
    }

    async fn create(&self, data: &CreateTag) -> AppResult<Tag> {
        let mut state = self.state.write().await;
        if !state.containers.contains_key(&data.container_id) {
            return Err(missing_reference("container", data.container_id));
        }
        if state
            .tags
            .values()
            .any(|t| t.container_id == data.container_id && t.name == data.name)
        {
            return Err(AppError::conflict(format!(
                "Tag '{}' already exists in this container",
                data.name
            )));
        }

        let now = Utc::now();
        let tag = Tag {
            id: Uuid::now_v7(),
            container_id: data.container_id,
            name: data.name.clone(),
            icon: data.icon.clone(),
            color: data.color.clone(),
            created_at: now,
            updated_at: now,
        };
        state.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn update(&self, tag: &Tag) -> AppResult<Tag> {
        let mut state = self.state.write().await;
        if state
            .tags
            .values()
            .any(|t| t.id != tag.id && t.container_id == tag.container_id && t.name == tag.name)
        {
            return Err(AppError::conflict(format!(
                "Tag '{}' already exists in this container",
                tag.name
            )));
        }

        let stored = state
            .tags
            .get_mut(&tag.id)
            .ok_or_else(|| AppError::not_found(format!("Tag {} not found", tag.id)))?;
        stored.name = tag.name.clone();
        stored.icon = tag.icon.clone();
        stored.color = tag.color.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.state.write().await.tags.remove(&id).is_some())
    }
}
