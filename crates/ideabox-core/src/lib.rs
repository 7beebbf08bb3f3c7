//! # ideabox-core
//!
//! Core crate for Idea Box. Contains the storage and cache traits,
//! configuration schemas, filter/sort predicate types, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other Idea Box crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
