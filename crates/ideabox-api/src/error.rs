//! Maps domain `AppError` to HTTP responses.

// `IntoResponse for AppError` lives in ideabox-core (orphan rule).
pub use ideabox_core::error::{ApiErrorResponse, status_for};

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use ideabox_core::error::ErrorKind;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(ErrorKind::NotFound).0, StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(ErrorKind::InvalidPath),
            (StatusCode::BAD_REQUEST, "INVALID_PATH")
        );
        assert_eq!(status_for(ErrorKind::Conflict).0, StatusCode::CONFLICT);
        assert_eq!(
            status_for(ErrorKind::Integrity),
            (StatusCode::INTERNAL_SERVER_ERROR, "INTEGRITY_ERROR")
        );
        assert_eq!(status_for(ErrorKind::Database).1, "INTERNAL_ERROR");
        assert_eq!(status_for(ErrorKind::ExternalService).1, "INTERNAL_ERROR");
    }
}
