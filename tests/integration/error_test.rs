//! Integration tests for error responses.

use axum::http::StatusCode;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_missing_records_are_not_found() {
    let app = TestApp::new().await;
    let missing = Uuid::new_v4();

    for path in [
        format!("/api/containers/{missing}"),
        format!("/api/folders/{missing}"),
        format!("/api/ideas/{missing}"),
        format!("/api/ideas?container={missing}"),
    ] {
        let response = app.request("GET", &path, None).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{path}");
        assert_eq!(response.error_code(), Some("NOT_FOUND"));
        assert!(response.body["message"].is_string());
    }
}

#[tokio::test]
async fn test_malformed_path_is_invalid() {
    let app = TestApp::new().await;
    let c = app.create_container("Work").await;

    let response = app
        .request("GET", &format!("/api/ideas?container={c}&path=not-a-folder"), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_PATH"));

    let response = app
        .request("GET", &format!("/api/path/valid?container={c}&path=not-a-folder"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["valid"], false);
}

#[tokio::test]
async fn test_unknown_route() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/nothing-here", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
