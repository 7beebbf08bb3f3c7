//! Shared fixtures for service tests: in-memory stores and a temporary
//! attachment root.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tempfile::TempDir;
use uuid::Uuid;

use ideabox_core::traits::storage::StorageProvider;
use ideabox_database::{EntryStore, Stores};
use ideabox_entity::container::Container;
use ideabox_entity::entry::{EntryKind, Idea};
use ideabox_entity::folder::Folder;
use ideabox_service::{
    ContainerService, CreateIdea, FolderService, IdeaService, NewFolder, PathResolver,
    SaveContainer, SearchService, TagService, Upload,
};
use ideabox_storage::LocalStorageProvider;

/// Every service wired over one in-memory store.
pub struct TestContext {
    pub stores: Stores,
    pub storage: Arc<dyn StorageProvider>,
    pub resolver: Arc<PathResolver>,
    pub containers: ContainerService,
    pub folders: FolderService,
    pub ideas: IdeaService,
    pub tags: TagService,
    pub search: SearchService,
    _dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_stores(Stores::memory()).await
    }

    /// Same as [`TestContext::new`] but with a replacement entry store.
    pub async fn with_entries(wrap: impl FnOnce(Arc<dyn EntryStore>) -> Arc<dyn EntryStore>) -> Self {
        let mut stores = Stores::memory();
        stores.entries = wrap(Arc::clone(&stores.entries));
        Self::with_stores(stores).await
    }

    async fn with_stores(stores: Stores) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage: Arc<dyn StorageProvider> = Arc::new(
            LocalStorageProvider::new(dir.path().to_str().expect("utf-8 path"))
                .await
                .expect("storage"),
        );
        let resolver = Arc::new(PathResolver::new(
            Arc::clone(&stores.containers),
            Arc::clone(&stores.folders),
        ));

        Self {
            containers: ContainerService::new(&stores, Arc::clone(&storage)),
            folders: FolderService::new(&stores, Arc::clone(&resolver), Arc::clone(&storage)),
            ideas: IdeaService::new(&stores, Arc::clone(&resolver), Arc::clone(&storage)),
            tags: TagService::new(&stores, Arc::clone(&resolver)),
            search: SearchService::new(&stores, Arc::clone(&resolver)),
            stores,
            storage,
            resolver,
            _dir: dir,
        }
    }

    /// Root directory of the attachment storage.
    pub fn storage_root(&self) -> &Path {
        self._dir.path()
    }

    pub async fn container(&self, name: &str) -> Container {
        self.containers
            .create(SaveContainer {
                name: name.to_string(),
                icon: "box".into(),
                color: "#336699".into(),
                ..Default::default()
            })
            .await
            .expect("create container")
    }

    pub async fn folder(&self, container: Uuid, parent: Option<Uuid>, name: &str) -> Folder {
        self.folders
            .create(NewFolder {
                container_id: container,
                parent_id: parent,
                name: name.to_string(),
                icon: "folder".into(),
                color: "#000000".into(),
            })
            .await
            .expect("create folder")
    }

    pub async fn text(
        &self,
        container: Uuid,
        folder: Option<Uuid>,
        content: &str,
        tags: &[&str],
    ) -> Idea {
        self.ideas
            .create(CreateIdea {
                container_id: container,
                folder_id: folder,
                kind: EntryKind::Text,
                tags: tags.iter().map(|t| t.to_string()).collect(),
                content: Some(content.to_string()),
                link: None,
                image: None,
            })
            .await
            .expect("create text idea")
    }

    pub async fn link(&self, container: Uuid, folder: Option<Uuid>, url: &str, tags: &[&str]) -> Idea {
        self.ideas
            .create(CreateIdea {
                container_id: container,
                folder_id: folder,
                kind: EntryKind::Link,
                tags: tags.iter().map(|t| t.to_string()).collect(),
                content: None,
                link: Some(url.to_string()),
                image: None,
            })
            .await
            .expect("create link idea")
    }

    pub async fn image(&self, container: Uuid, folder: Option<Uuid>, tags: &[&str]) -> Idea {
        self.ideas
            .create(CreateIdea {
                container_id: container,
                folder_id: folder,
                kind: EntryKind::Image,
                tags: tags.iter().map(|t| t.to_string()).collect(),
                content: None,
                link: None,
                image: Some(png("photo.png")),
            })
            .await
            .expect("create image idea")
    }
}

/// A small PNG upload.
pub fn png(name: &str) -> Upload {
    Upload {
        file_name: name.to_string(),
        content_type: "image/png".to_string(),
        data: Bytes::from_static(b"\x89PNG\r\n\x1a\n0000"),
    }
}

/// Let the clock move so consecutive records get distinct timestamps.
pub async fn tick() {
    tokio::time::sleep(Duration::from_millis(2)).await;
}
