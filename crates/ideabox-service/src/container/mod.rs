//! Container management.

pub mod service;

pub use service::{ContainerService, SaveContainer};
