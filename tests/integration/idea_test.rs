//! Integration tests for idea endpoints.

use std::sync::atomic::Ordering;

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{PNG, Part, TestApp};

#[tokio::test]
async fn test_create_text_idea() {
    let app = TestApp::new().await;
    let c = app.create_container("Work").await;

    let response = app
        .multipart(
            "POST",
            "/api/ideas",
            &[
                Part::Text("container_id", &c),
                Part::Text("type", "text"),
                Part::Text("content", "hello"),
                Part::Text("tags", r#"["x", "y"]"#),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let idea = response.data();
    assert_eq!(idea["type"], "text");
    assert_eq!(idea["content"], "hello");
    assert_eq!(idea["tags"], json!(["x", "y"]));
    assert_eq!(idea["pinned"], false);
    assert_eq!(idea["folder_id"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_image_idea_round_trip() {
    let app = TestApp::new().await;
    let c = app.create_container("Work").await;

    let response = app
        .multipart(
            "POST",
            "/api/ideas",
            &[
                Part::Text("container_id", &c),
                Part::Text("type", "image"),
                Part::File {
                    name: "image",
                    file_name: "shot.png",
                    content_type: "image/png",
                    data: PNG,
                },
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.id();

    let image = app.request("GET", &format!("/api/ideas/{id}/image"), None).await;
    assert_eq!(image.status, StatusCode::OK);
    assert_eq!(image.content_type.as_deref(), Some("image/png"));
    assert_eq!(image.raw, PNG);
}

#[tokio::test]
async fn test_image_idea_requires_file() {
    let app = TestApp::new().await;
    let c = app.create_container("Work").await;

    let response = app
        .multipart(
            "POST",
            "/api/ideas",
            &[Part::Text("container_id", &c), Part::Text("type", "image")],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), Some("VALIDATION_ERROR"));
}

#[tokio::test]
async fn test_unknown_type_is_rejected() {
    let app = TestApp::new().await;
    let c = app.create_container("Work").await;

    let response = app
        .multipart(
            "POST",
            "/api/ideas",
            &[
                Part::Text("container_id", &c),
                Part::Text("type", "video"),
                Part::Text("content", "x"),
            ],
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_listing_pins_and_archive() {
    let app = TestApp::new().await;
    let c = app.create_container("Work").await;
    let first = app.create_text(&c, None, "first", "").await;
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    let second = app.create_text(&c, None, "second", "").await;

    let response = app.request("GET", &format!("/api/ideas?container={c}"), None).await;
    let ids: Vec<_> = response
        .data()
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec![second.clone(), first.clone()]);

    app.request("POST", &format!("/api/ideas/{first}/pin"), None).await;
    let response = app.request("GET", &format!("/api/ideas?container={c}"), None).await;
    assert_eq!(response.data()[0]["id"], first.as_str());

    let response = app
        .request("POST", &format!("/api/ideas/{first}/archive"), None)
        .await;
    assert_eq!(response.data()["archived"], true);
    assert_eq!(response.data()["pinned"], false);

    let response = app.request("GET", &format!("/api/ideas?container={c}"), None).await;
    assert_eq!(response.data().as_array().unwrap().len(), 1);
    let response = app
        .request("GET", &format!("/api/ideas?container={c}&archived=true"), None)
        .await;
    assert_eq!(response.data()[0]["id"], first.as_str());
}

#[tokio::test]
async fn test_update_cannot_change_type() {
    let app = TestApp::new().await;
    let c = app.create_container("Work").await;
    let id = app.create_text(&c, None, "note", "").await;

    let response = app
        .multipart(
            "PUT",
            &format!("/api/ideas/{id}"),
            &[Part::Text("type", "link"), Part::Text("link", "https://x.example")],
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app
        .multipart(
            "PUT",
            &format!("/api/ideas/{id}"),
            &[
                Part::Text("type", "text"),
                Part::Text("content", "edited"),
                Part::Text("tags", "a, b"),
            ],
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["content"], "edited");
    assert_eq!(response.data()["tags"], json!(["a", "b"]));
}

#[tokio::test]
async fn test_move_between_folders() {
    let app = TestApp::new().await;
    let c = app.create_container("Work").await;
    let a = app.create_folder(&c, None, "a").await;
    let b = app.create_folder(&c, Some(&a), "b").await;
    let id = app.create_text(&c, None, "note", "").await;

    let response = app
        .request(
            "POST",
            &format!("/api/ideas/{id}/move"),
            Some(json!({ "target_id": b })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["folder_id"], b.as_str());

    let response = app
        .request("POST", &format!("/api/ideas/{id}/remove-from-parent"), None)
        .await;
    assert_eq!(response.data()["folder_id"], a.as_str());

    let response = app
        .request("GET", &format!("/api/ideas?container={c}&path={a}"), None)
        .await;
    assert_eq!(response.data()[0]["id"], id.as_str());
}

#[tokio::test]
async fn test_link_preview_uses_cache() {
    let app = TestApp::new().await;
    let c = app.create_container("Work").await;
    let response = app
        .multipart(
            "POST",
            "/api/ideas",
            &[
                Part::Text("container_id", &c),
                Part::Text("type", "link"),
                Part::Text("link", "https://example.com"),
            ],
        )
        .await;
    let id = response.id();

    for _ in 0..2 {
        let preview = app
            .request("GET", &format!("/api/ideas/{id}/preview"), None)
            .await;
        assert_eq!(preview.status, StatusCode::OK);
        assert_eq!(preview.data()["title"], "Stub page");
        assert_eq!(preview.data()["url"], "https://example.com");
    }
    assert_eq!(app.fetcher.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_delete_idea() {
    let app = TestApp::new().await;
    let c = app.create_container("Work").await;
    let id = app.create_text(&c, None, "bye", "").await;

    let response = app.request("DELETE", &format!("/api/ideas/{id}"), None).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.request("DELETE", &format!("/api/ideas/{id}"), None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
