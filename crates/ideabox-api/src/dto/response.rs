//! Response DTOs.

use serde::{Deserialize, Serialize};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status: `ok` or `degraded`.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Record store backend in use.
    pub database: String,
    /// Attachment storage status.
    pub storage: String,
    /// Cache status.
    pub cache: String,
}

/// Result of a path validity check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathValidity {
    /// Whether the path resolves inside the container.
    pub valid: bool,
}

/// Result of a container existence check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Existence {
    /// Whether the container exists.
    pub exists: bool,
}
