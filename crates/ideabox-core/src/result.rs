//! Convenience result type alias for Idea Box.

use crate::error::AppError;

/// A specialized `Result` type for Idea Box operations.
pub type AppResult<T> = Result<T, AppError>;
