//! Integration tests for folder and path endpoints.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_list_folders_by_path() {
    let app = TestApp::new().await;
    let c = app.create_container("Work").await;
    let a = app.create_folder(&c, None, "a").await;
    let b = app.create_folder(&c, Some(&a), "b").await;

    let response = app
        .request("GET", &format!("/api/folders?container={c}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let roots = response.data().as_array().unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0]["id"], a.as_str());

    let response = app
        .request("GET", &format!("/api/folders?container={c}&path={a}"), None)
        .await;
    assert_eq!(response.data()[0]["id"], b.as_str());

    let response = app
        .request("GET", &format!("/api/folders?container={c}&path={b}"), None)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("INVALID_PATH"));
}

#[tokio::test]
async fn test_path_details_and_validity() {
    let app = TestApp::new().await;
    let c = app.create_container("Work").await;
    let a = app.create_folder(&c, None, "a").await;
    let b = app.create_folder(&c, Some(&a), "b").await;

    let response = app
        .request("GET", &format!("/api/path?container={c}&folder={b}"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["container"]["id"], c.as_str());
    let route: Vec<_> = response.data()["route"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(route, vec![a.clone(), b.clone()]);

    let response = app
        .request("GET", &format!("/api/path/valid?container={c}&path={a}/{b}"), None)
        .await;
    assert_eq!(response.data()["valid"], true);

    let response = app
        .request("GET", &format!("/api/path/valid?container={c}&path={b}/{a}"), None)
        .await;
    assert_eq!(response.data()["valid"], false);
}

#[tokio::test]
async fn test_move_into_descendant_is_rejected() {
    let app = TestApp::new().await;
    let c = app.create_container("Work").await;
    let a = app.create_folder(&c, None, "a").await;
    let b = app.create_folder(&c, Some(&a), "b").await;

    let response = app
        .request(
            "POST",
            &format!("/api/folders/{a}/move"),
            Some(json!({ "target_id": b })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("VALIDATION_ERROR"));

    let response = app
        .request("POST", &format!("/api/folders/{b}/remove-from-parent"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["parent_id"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_rename_and_delete_folder() {
    let app = TestApp::new().await;
    let c = app.create_container("Work").await;
    let a = app.create_folder(&c, None, "a").await;
    let idea = app.create_text(&c, Some(&a), "inside", "").await;

    let response = app
        .request(
            "PUT",
            &format!("/api/folders/{a}"),
            Some(json!({ "name": "renamed", "icon": "star" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["name"], "renamed");

    let response = app.request("DELETE", &format!("/api/folders/{a}"), None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.request("GET", &format!("/api/ideas/{idea}"), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_empty_folder_name_is_rejected() {
    let app = TestApp::new().await;
    let c = app.create_container("Work").await;

    let response = app
        .request(
            "POST",
            "/api/folders",
            Some(json!({ "container_id": c, "name": "" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("VALIDATION_ERROR"));
}
