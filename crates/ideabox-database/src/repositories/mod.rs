//! PostgreSQL implementations of the record store traits.

pub mod container;
pub mod entry;
pub mod folder;
pub(crate) mod query;
pub mod tag;

pub use container::ContainerRepository;
pub use entry::EntryRepository;
pub use folder::FolderRepository;
pub use tag::TagRepository;
