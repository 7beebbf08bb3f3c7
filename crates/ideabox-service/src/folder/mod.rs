//! Folder management.

pub mod service;

pub use service::{FolderService, NewFolder, UpdateFolder};
