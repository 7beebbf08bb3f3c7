//! # ideabox-entity
//!
//! Domain entity models for Idea Box. Stored records derive
//! `sqlx::FromRow`; the read-side views (`Idea`, `SearchHit`,
//! `PathDetails`) are assembled by the service layer.

pub mod container;
pub mod entry;
pub mod folder;
pub mod preview;
pub mod search;
pub mod tag;
