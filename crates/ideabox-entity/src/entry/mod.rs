//! Entry ("idea") entities: the base record, its typed child, and the
//! unified read view.

pub mod idea;
pub mod kind;
pub mod model;

pub use idea::Idea;
pub use kind::EntryKind;
pub use model::{ChildRecord, CreateEntry, Entry, EntryPayload, JoinedEntry};
