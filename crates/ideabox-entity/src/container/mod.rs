//! Container (top-level board) entities.

pub mod model;

pub use model::{Container, ContainerSummary, CreateContainer, EntryCounts};
