//! # ideabox-database
//!
//! The record store behind Idea Box: one async trait per collection
//! family, a PostgreSQL implementation built on sqlx, and an in-memory
//! implementation used by tests and the `memory` backend.

pub mod backend;
pub mod memory;
pub mod repositories;
pub mod store;

pub use backend::RecordBackend;
pub use memory::MemoryStore;
pub use store::{ContainerStore, EntryStore, FolderStore, Stores, TagStore};
