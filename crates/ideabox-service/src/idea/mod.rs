//! Idea assembly, recursive search, and link previews.

pub mod html;
pub mod preview;
pub mod search;
pub mod service;

pub use preview::{HttpPreviewFetcher, LinkPreviewService, PreviewFetcher};
pub use search::{SearchQuery, SearchService};
pub use service::{CreateIdea, IdeaService, UpdateIdea};

use ideabox_core::result::AppResult;
use ideabox_core::types::{FilterField, SortField};
use ideabox_database::EntryStore;
use ideabox_entity::entry::{EntryKind, Idea};

/// The payload column a text query is matched against, per kind.
fn searchable_field(kind: EntryKind) -> Option<&'static str> {
    match kind {
        EntryKind::Text => Some("content"),
        EntryKind::Link => Some("link"),
        EntryKind::Image => None,
    }
}

/// Query all three child tables with the same base filters, assemble the
/// rows into ideas, and merge them into listing order.
///
/// A non-empty `query` is matched against each kind's searchable column;
/// kinds without one are skipped.
pub(crate) async fn fetch_ideas(
    entries: &dyn EntryStore,
    filters: &[FilterField],
    query: &str,
) -> AppResult<Vec<Idea>> {
    let sort = [
        SortField::desc("base_entry.pinned"),
        SortField::desc("base_entry.created"),
    ];
    let mut ideas = Vec::new();

    for kind in EntryKind::ALL {
        let mut kind_filters = filters.to_vec();
        if !query.is_empty() {
            let Some(field) = searchable_field(kind) else {
                continue;
            };
            kind_filters.push(FilterField::contains(field, query));
        }

        for joined in entries.list_joined(kind, &kind_filters, &sort).await? {
            ideas.push(Idea::try_from(joined)?);
        }
    }

    Idea::sort_for_display(&mut ideas);
    Ok(ideas)
}
