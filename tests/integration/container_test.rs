//! Integration tests for container endpoints.

use axum::http::StatusCode;

use crate::helpers::{PNG, Part, TestApp};

#[tokio::test]
async fn test_create_and_list_containers() {
    let app = TestApp::new().await;
    let work = app.create_container("Work").await;
    let home = app.create_container("Home").await;
    app.create_text(&work, None, "note", "").await;

    app.request("POST", &format!("/api/containers/{home}/pin"), None)
        .await;

    let response = app.request("GET", "/api/containers", None).await;
    assert_eq!(response.status, StatusCode::OK);

    let listed = response.data().as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["id"], home.as_str());
    assert_eq!(listed[0]["pinned"], true);
    assert_eq!(listed[1]["name"], "Work");
    assert_eq!(listed[1]["text_count"], 1);
    assert_eq!(listed[1]["link_count"], 0);
}

#[tokio::test]
async fn test_duplicate_container_name_conflicts() {
    let app = TestApp::new().await;
    app.create_container("Work").await;

    let response = app
        .multipart("POST", "/api/containers", &[Part::Text("name", "Work")])
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert_eq!(response.error_code(), Some("CONFLICT"));
}

#[tokio::test]
async fn test_hidden_containers_need_opt_in() {
    let app = TestApp::new().await;
    let id = app.create_container("Secret").await;

    let response = app
        .request("POST", &format!("/api/containers/{id}/hide"), None)
        .await;
    assert_eq!(response.data()["hidden"], true);

    let visible = app.request("GET", "/api/containers", None).await;
    assert!(visible.data().as_array().unwrap().is_empty());

    let all = app
        .request("GET", "/api/containers?include_hidden=true", None)
        .await;
    assert_eq!(all.data().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cover_upload_and_download() {
    let app = TestApp::new().await;
    let created = app
        .multipart(
            "POST",
            "/api/containers",
            &[
                Part::Text("name", "Art"),
                Part::Text("color", "#abcdef"),
                Part::File {
                    name: "cover",
                    file_name: "cover.png",
                    content_type: "image/png",
                    data: PNG,
                },
            ],
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.data()["color"], "#abcdef");
    let id = created.id();

    let cover = app
        .request("GET", &format!("/api/containers/{id}/cover"), None)
        .await;
    assert_eq!(cover.status, StatusCode::OK);
    assert_eq!(cover.content_type.as_deref(), Some("image/png"));
    assert_eq!(cover.raw, PNG);
}

#[tokio::test]
async fn test_non_image_cover_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .multipart(
            "POST",
            "/api/containers",
            &[
                Part::Text("name", "Docs"),
                Part::File {
                    name: "cover",
                    file_name: "notes.txt",
                    content_type: "text/plain",
                    data: b"hello",
                },
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_exists_and_delete() {
    let app = TestApp::new().await;
    let id = app.create_container("Temp").await;

    let response = app
        .request("GET", &format!("/api/containers/{id}/exists"), None)
        .await;
    assert_eq!(response.data()["exists"], true);

    let response = app
        .request("DELETE", &format!("/api/containers/{id}"), None)
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app
        .request("GET", &format!("/api/containers/{id}/exists"), None)
        .await;
    assert_eq!(response.data()["exists"], false);

    let response = app.request("GET", &format!("/api/containers/{id}"), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
