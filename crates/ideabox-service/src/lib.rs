//! # ideabox-service
//!
//! Business logic for Idea Box. Services are built from the record
//! stores, the attachment storage provider, and the preview cache, all
//! injected at construction time as `Arc` references.

pub mod attachment;
pub mod container;
pub mod folder;
pub mod idea;
pub mod path;
pub mod tag;

pub use attachment::Upload;
pub use container::{ContainerService, SaveContainer};
pub use folder::{FolderService, NewFolder, UpdateFolder};
pub use idea::{
    CreateIdea, HttpPreviewFetcher, IdeaService, LinkPreviewService, PreviewFetcher,
    SearchQuery, SearchService, UpdateIdea,
};
pub use path::PathResolver;
pub use tag::{SaveTag, TagService};
