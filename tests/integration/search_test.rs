//! Integration tests for search and tag endpoints.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_search_returns_full_paths() {
    let app = TestApp::new().await;
    let c = app.create_container("Work").await;
    let a = app.create_folder(&c, None, "a").await;
    let b = app.create_folder(&c, Some(&a), "b").await;
    app.create_text(&c, None, "rust at root", "").await;
    let deep = app.create_text(&c, Some(&b), "Rust deep down", "").await;
    app.create_text(&c, Some(&a), "python", "").await;

    let response = app
        .request("GET", &format!("/api/search?container={c}&q=rust"), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let hits = response.data().as_array().unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0]["full_path"], json!([]));
    assert_eq!(hits[1]["id"], deep.as_str());
    assert_eq!(hits[1]["full_path"], json!([a, b]));
    assert_eq!(hits[1]["folder"]["id"], b.as_str());

    let response = app
        .request(
            "GET",
            &format!("/api/search?container={c}&q=rust&folder={a}"),
            None,
        )
        .await;
    let hits = response.data().as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["full_path"], json!([b]));
}

#[tokio::test]
async fn test_search_by_tags() {
    let app = TestApp::new().await;
    let c = app.create_container("Work").await;
    let both = app.create_text(&c, None, "one", "x,y").await;
    app.create_text(&c, None, "two", "x").await;

    let response = app
        .request("GET", &format!("/api/search?container={c}&tags=x,y"), None)
        .await;
    let hits = response.data().as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["id"], both.as_str());
}

#[tokio::test]
async fn test_tag_listing_with_amounts() {
    let app = TestApp::new().await;
    let c = app.create_container("Work").await;
    for name in ["rare", "common"] {
        let response = app
            .request(
                "POST",
                "/api/tags",
                Some(json!({ "container_id": c, "name": name, "color": "#00ff00" })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }
    app.create_text(&c, None, "1", "common").await;
    app.create_text(&c, None, "2", "common,rare").await;
    app.create_text(&c, None, "3", "common").await;

    let response = app.request("GET", &format!("/api/tags?container={c}"), None).await;
    assert_eq!(response.status, StatusCode::OK);
    let tags = response.data().as_array().unwrap();
    assert_eq!(tags[0]["name"], "common");
    assert_eq!(tags[0]["amount"], 3);
    assert_eq!(tags[1]["name"], "rare");
    assert_eq!(tags[1]["amount"], 1);

    let response = app
        .request(
            "POST",
            "/api/tags",
            Some(json!({ "container_id": c, "name": "rare" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}
