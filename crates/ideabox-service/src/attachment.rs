//! Uploaded files and their storage keys.

use bytes::Bytes;
use uuid::Uuid;

use ideabox_core::error::AppError;
use ideabox_core::result::AppResult;
use ideabox_storage::is_supported_image;

/// A file received with a request.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Client-supplied file name.
    pub file_name: String,
    /// Declared MIME type.
    pub content_type: String,
    /// File contents.
    pub data: Bytes,
}

impl Upload {
    /// Reject empty files and anything that is not an accepted image type.
    pub fn ensure_image(&self) -> AppResult<()> {
        if self.data.is_empty() {
            return Err(AppError::validation("Uploaded image is empty"));
        }
        if !is_supported_image(&self.content_type) {
            return Err(AppError::validation(format!(
                "Unsupported image type '{}'",
                self.content_type
            )));
        }
        Ok(())
    }

    /// File name reduced to characters that are safe in a storage key.
    fn safe_name(&self) -> String {
        let name: String = self
            .file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
            .collect();
        let name = name.trim_start_matches('.');
        if name.is_empty() {
            "image".to_string()
        } else {
            name.to_string()
        }
    }
}

/// Storage key for an idea image. Every upload gets a fresh key so a
/// replacement never overwrites the file it replaces.
pub(crate) fn idea_image_key(entry_id: Uuid, upload: &Upload) -> String {
    format!("entries/{entry_id}/{}_{}", Uuid::new_v4().simple(), upload.safe_name())
}

/// Storage key for a container cover. Covers can be stored before the
/// container record exists, so the key does not depend on its id.
pub(crate) fn container_cover_key(upload: &Upload) -> String {
    format!("covers/{}_{}", Uuid::new_v4().simple(), upload.safe_name())
}
