//! # ideabox-storage
//!
//! Local filesystem storage for uploaded idea images and container covers.

pub mod local;
pub mod mime;

pub use local::LocalStorageProvider;
pub use mime::{IMAGE_MIME_TYPES, is_supported_image, mime_from_path};
