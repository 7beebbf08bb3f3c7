//! Record store traits.
//!
//! Each collection family gets its own trait so services depend only on
//! the operations they use. List methods take predicate slices combined
//! with an implicit AND and sort keys applied most-significant first.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use ideabox_core::result::AppResult;
use ideabox_core::types::{FilterField, SortField};
use ideabox_entity::container::{Container, CreateContainer};
use ideabox_entity::entry::{ChildRecord, CreateEntry, Entry, EntryKind, EntryPayload, JoinedEntry};
use ideabox_entity::folder::{CreateFolder, Folder};
use ideabox_entity::tag::{CreateTag, Tag};

use crate::memory::MemoryStore;
use crate::repositories::{ContainerRepository, EntryRepository, FolderRepository, TagRepository};

/// Containers. Filter/sort fields: `id`, `name`, `pinned`, `hidden`, `created`.
#[async_trait]
pub trait ContainerStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a container by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Container>>;

    /// Check whether a container exists.
    async fn exists(&self, id: Uuid) -> AppResult<bool>;

    /// List containers matching every filter.
    async fn list(&self, filters: &[FilterField], sort: &[SortField]) -> AppResult<Vec<Container>>;

    /// Create a container. Fails with a conflict if the name is taken.
    async fn create(&self, data: &CreateContainer) -> AppResult<Container>;

    /// Persist name, icon, color, cover, pinned, and hidden.
    async fn update(&self, container: &Container) -> AppResult<Container>;

    /// Delete a container with its folders, entries, and tags.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Folders. Filter/sort fields: `id`, `container`, `parent`, `name`, `created`.
#[async_trait]
pub trait FolderStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a folder by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>>;

    /// Check whether a folder exists.
    async fn exists(&self, id: Uuid) -> AppResult<bool>;

    /// List folders matching every filter.
    async fn list(&self, filters: &[FilterField], sort: &[SortField]) -> AppResult<Vec<Folder>>;

    /// Create a folder.
    async fn create(&self, data: &CreateFolder) -> AppResult<Folder>;

    /// Persist parent, name, icon, and color.
    async fn update(&self, folder: &Folder) -> AppResult<Folder>;

    /// Delete a folder with its sub-folders and their entries.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Entries: the base table plus the three child tables.
///
/// Base filter fields: `id`, `container`, `folder`, `type`, `tags`,
/// `pinned`, `archived`, `created`. Joined listings prefix base fields
/// with `base_entry.` and add the payload column of the queried kind
/// (`content`, `link`, or `image`).
#[async_trait]
pub trait EntryStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a base record by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Entry>>;

    /// Check whether a base record exists.
    async fn exists(&self, id: Uuid) -> AppResult<bool>;

    /// Insert a base record.
    async fn create(&self, data: &CreateEntry) -> AppResult<Entry>;

    /// Persist folder, tags, pinned, and archived. The kind never changes.
    async fn update(&self, entry: &Entry) -> AppResult<Entry>;

    /// Delete a base record together with its child row.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Count base records matching every filter.
    async fn count(&self, filters: &[FilterField]) -> AppResult<u64>;

    /// Insert the child row for `base_entry` into the payload's table.
    async fn insert_child(&self, base_entry: Uuid, payload: &EntryPayload) -> AppResult<ChildRecord>;

    /// Find the child row of `base_entry` in the `kind` table.
    async fn find_child(&self, kind: EntryKind, base_entry: Uuid) -> AppResult<Option<ChildRecord>>;

    /// Overwrite a child row's payload. The payload kind must not change.
    async fn update_child(&self, child: &ChildRecord) -> AppResult<ChildRecord>;

    /// List child rows of one kind joined with their base records.
    async fn list_joined(
        &self,
        kind: EntryKind,
        filters: &[FilterField],
        sort: &[SortField],
    ) -> AppResult<Vec<JoinedEntry>>;
}

/// Tags. Filter/sort fields: `id`, `container`, `name`.
#[async_trait]
pub trait TagStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a tag by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Tag>>;

    /// List tags matching every filter.
    async fn list(&self, filters: &[FilterField], sort: &[SortField]) -> AppResult<Vec<Tag>>;

    /// Create a tag. Fails with a conflict if the name is taken in the container.
    async fn create(&self, data: &CreateTag) -> AppResult<Tag>;

    /// Persist name, icon, and color.
    async fn update(&self, tag: &Tag) -> AppResult<Tag>;

    /// Delete a tag.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// The full set of stores the services are built from.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Container store.
    pub containers: Arc<dyn ContainerStore>,
    /// Folder store.
    pub folders: Arc<dyn FolderStore>,
    /// Entry store.
    pub entries: Arc<dyn EntryStore>,
    /// Tag store.
    pub tags: Arc<dyn TagStore>,
}

impl Stores {
    /// Stores backed by PostgreSQL.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            containers: Arc::new(ContainerRepository::new(pool.clone())),
            folders: Arc::new(FolderRepository::new(pool.clone())),
            entries: Arc::new(EntryRepository::new(pool.clone())),
            tags: Arc::new(TagRepository::new(pool)),
        }
    }

    /// Stores sharing one in-memory state.
    pub fn memory() -> Self {
        Self::from_memory(MemoryStore::new())
    }

    /// Stores backed by an existing in-memory state.
    pub fn from_memory(store: MemoryStore) -> Self {
        Self {
            containers: Arc::new(store.clone()),
            folders: Arc::new(store.clone()),
            entries: Arc::new(store.clone()),
            tags: Arc::new(store),
        }
    }
}
