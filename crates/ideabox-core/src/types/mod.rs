//! Core type definitions used across the Idea Box workspace.

pub mod filter;
pub mod sorting;

pub use filter::{FieldSource, FilterField, FilterOp, FilterValue, matches_all};
pub use sorting::{SortDirection, SortField, sort_records};
