//! Search result values.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entry::Idea;
use crate::folder::Folder;

/// An idea found by a recursive search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    /// The matched idea.
    #[serde(flatten)]
    pub idea: Idea,
    /// Folder ids walked from the search's start folder (exclusive) down to
    /// the folder holding the idea. Empty for matches in the start folder.
    pub full_path: Vec<Uuid>,
    /// The folder holding the idea, or `None` at the container root.
    pub folder: Option<Folder>,
}
