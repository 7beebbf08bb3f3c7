//! Link preview metadata.

use serde::{Deserialize, Serialize};

/// Open Graph style metadata scraped from a link idea's target page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkPreview {
    /// Page title.
    pub title: Option<String>,
    /// Page description.
    pub description: Option<String>,
    /// Absolute URL of the preview image.
    pub image: Option<String>,
    /// Site name.
    pub site_name: Option<String>,
    /// Canonical URL reported by the page.
    pub url: Option<String>,
    /// Open Graph object type (`website`, `article`, ...).
    pub kind: Option<String>,
}

impl LinkPreview {
    /// Whether nothing useful was extracted.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.site_name.is_none()
    }
}
