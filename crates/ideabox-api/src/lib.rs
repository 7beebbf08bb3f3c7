//! # ideabox-api
//!
//! HTTP API layer for Idea Box built on Axum.
//!
//! Provides the REST endpoints for containers, folders, ideas, and tags,
//! the path and search endpoints, middleware (CORS, logging), request
//! extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state};
pub use state::AppState;
