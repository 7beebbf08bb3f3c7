//! The unified, type-tagged view of an entry.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ideabox_core::error::AppError;
use ideabox_core::result::AppResult;

use super::kind::EntryKind;
use super::model::{Entry, EntryPayload, JoinedEntry};

/// One idea: the shared base fields plus exactly one payload variant.
///
/// Serialized flat, with the payload's `type` tag next to the base fields:
/// `{"id": ..., "type": "text", "content": "hello", "pinned": false, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Idea {
    /// Base record identifier.
    pub id: Uuid,
    /// The owning container.
    pub container_id: Uuid,
    /// The containing folder (None at the container root).
    pub folder_id: Option<Uuid>,
    /// Tag names.
    pub tags: Vec<String>,
    /// Pinned flag.
    pub pinned: bool,
    /// Archived flag.
    pub archived: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
    /// Type-specific payload.
    #[serde(flatten)]
    pub payload: EntryPayload,
}

impl Idea {
    /// Assemble an idea from its base record and payload.
    ///
    /// Fails if the payload does not belong to the table the base record's
    /// kind selects.
    pub fn assemble(base: Entry, payload: EntryPayload) -> AppResult<Self> {
        if base.kind != payload.kind() {
            return Err(AppError::integrity(format!(
                "Entry {} is a {} entry but has a {} payload",
                base.id,
                base.kind,
                payload.kind()
            )));
        }
        Ok(Self {
            id: base.id,
            container_id: base.container_id,
            folder_id: base.folder_id,
            tags: base.tags,
            pinned: base.pinned,
            archived: base.archived,
            created_at: base.created_at,
            updated_at: base.updated_at,
            payload,
        })
    }

    /// The idea's kind.
    pub fn kind(&self) -> EntryKind {
        self.payload.kind()
    }

    /// Listing order: pinned first, then newest first.
    pub fn display_order(a: &Idea, b: &Idea) -> Ordering {
        b.pinned
            .cmp(&a.pinned)
            .then_with(|| b.created_at.cmp(&a.created_at))
    }

    /// Sort ideas into listing order.
    pub fn sort_for_display(ideas: &mut [Idea]) {
        ideas.sort_by(Self::display_order);
    }
}

impl TryFrom<JoinedEntry> for Idea {
    type Error = AppError;

    fn try_from(joined: JoinedEntry) -> Result<Self, Self::Error> {
        Self::assemble(joined.base, joined.child.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn idea(pinned: bool, created_at: DateTime<Utc>, content: &str) -> Idea {
        let base = Entry {
            id: Uuid::new_v4(),
            container_id: Uuid::nil(),
            folder_id: None,
            kind: EntryKind::Text,
            tags: vec![],
            pinned,
            archived: false,
            created_at,
            updated_at: created_at,
        };
        Idea::assemble(
            base,
            EntryPayload::Text {
                content: content.to_string(),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_pinned_first_then_newest() {
        let t1 = Utc::now();
        let t2 = t1 + Duration::seconds(1);
        let t3 = t1 + Duration::seconds(2);
        let mut ideas = vec![idea(true, t1, "A"), idea(false, t3, "B"), idea(true, t2, "D")];

        Idea::sort_for_display(&mut ideas);

        let order: Vec<_> = ideas
            .iter()
            .map(|i| match &i.payload {
                EntryPayload::Text { content } => content.as_str(),
                _ => "",
            })
            .collect();
        assert_eq!(order, ["D", "A", "B"]);
    }

    #[test]
    fn test_assemble_rejects_mismatched_payload() {
        let mut base = idea(false, Utc::now(), "x");
        base.payload = EntryPayload::Link {
            link: "https://example.com".into(),
        };
        let entry = Entry {
            id: base.id,
            container_id: base.container_id,
            folder_id: None,
            kind: EntryKind::Text,
            tags: vec![],
            pinned: false,
            archived: false,
            created_at: base.created_at,
            updated_at: base.updated_at,
        };
        let err = Idea::assemble(entry, base.payload).unwrap_err();
        assert_eq!(err.kind, ideabox_core::error::ErrorKind::Integrity);
    }

    #[test]
    fn test_serializes_flat_with_type_tag() {
        let json = serde_json::to_value(idea(false, Utc::now(), "hello")).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["content"], "hello");
        assert!(json.get("link").is_none());
        assert!(json.get("image").is_none());
    }
}
