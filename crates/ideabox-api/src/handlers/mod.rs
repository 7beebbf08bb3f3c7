//! Route handlers organized by domain.

pub mod container;
pub mod folder;
pub mod health;
pub mod idea;
pub mod path;
pub mod tag;

use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;

use ideabox_core::error::AppError;

/// Response carrying a stored attachment.
pub(crate) fn attachment_response(data: Bytes, content_type: &str) -> Result<Response, AppError> {
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(header::CONTENT_LENGTH, data.len())
        .header(header::CACHE_CONTROL, "private, max-age=3600")
        .body(Body::from(data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))
}
