//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use ideabox_cache::CacheManager;
use ideabox_core::config::{AppConfig, DatabaseBackend};
use ideabox_core::result::AppResult;
use ideabox_core::traits::storage::StorageProvider;
use ideabox_database::RecordBackend;
use ideabox_entity::preview::LinkPreview;
use ideabox_service::PreviewFetcher;
use ideabox_storage::LocalStorageProvider;

const BOUNDARY: &str = "ideabox-test-boundary";

/// Fetcher that answers every URL with a fixed preview.
#[derive(Debug, Default)]
pub struct StubFetcher {
    pub calls: AtomicUsize,
}

#[async_trait]
impl PreviewFetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> AppResult<LinkPreview> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(LinkPreview {
            title: Some("Stub page".to_string()),
            url: Some(url.to_string()),
            ..Default::default()
        })
    }
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Preview fetcher shared with the router
    pub fetcher: Arc<StubFetcher>,
    _storage_dir: TempDir,
}

/// One part of a multipart body.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
}

impl TestApp {
    /// Create a new test application over the in-memory record store
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.backend = DatabaseBackend::Memory;

        let storage_dir = tempfile::tempdir().expect("Failed to create storage dir");
        let storage: Arc<dyn StorageProvider> = Arc::new(
            LocalStorageProvider::new(storage_dir.path().to_str().expect("utf-8 path"))
                .await
                .expect("Failed to init storage"),
        );
        let cache = CacheManager::new(&config.cache);
        let fetcher = Arc::new(StubFetcher::default());

        let state = ideabox_api::build_state(
            config,
            RecordBackend::memory(),
            cache,
            storage,
            Arc::clone(&fetcher) as Arc<dyn PreviewFetcher>,
        );

        Self {
            router: ideabox_api::build_app(state),
            fetcher,
            _storage_dir: storage_dir,
        }
    }

    /// Make a JSON request to the test app
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Make a multipart request to the test app
    pub async fn multipart(&self, method: &str, path: &str, parts: &[Part<'_>]) -> TestResponse {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                            .as_bytes(),
                    );
                }
                Part::File {
                    name,
                    file_name,
                    content_type,
                    data,
                } => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(data);
                    body.extend_from_slice(b"\r\n");
                }
            }
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method(method)
            .uri(path)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let raw = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&raw).unwrap_or(Value::Null);

        TestResponse {
            status,
            content_type,
            body,
            raw: raw.to_vec(),
        }
    }

    /// Create a container and return its id
    pub async fn create_container(&self, name: &str) -> String {
        let response = self
            .multipart("POST", "/api/containers", &[Part::Text("name", name)])
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.id()
    }

    /// Create a folder and return its id
    pub async fn create_folder(&self, container: &str, parent: Option<&str>, name: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/folders",
                Some(serde_json::json!({
                    "container_id": container,
                    "parent_id": parent,
                    "name": name,
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.id()
    }

    /// Create a text idea and return its id
    pub async fn create_text(&self, container: &str, folder: Option<&str>, content: &str, tags: &str) -> String {
        let mut parts = vec![
            Part::Text("container_id", container),
            Part::Text("type", "text"),
            Part::Text("content", content),
            Part::Text("tags", tags),
        ];
        if let Some(folder) = folder {
            parts.push(Part::Text("folder_id", folder));
        }
        let response = self.multipart("POST", "/api/ideas", &parts).await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.id()
    }
}

/// A few bytes that pass as a PNG upload.
pub const PNG: &[u8] = b"\x89PNG\r\n\x1a\n0000";

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Content-Type header, if any
    pub content_type: Option<String>,
    /// Parsed JSON body (`Null` when the body is not JSON)
    pub body: Value,
    /// Raw body bytes
    pub raw: Vec<u8>,
}

impl TestResponse {
    /// The `data` member of a success envelope
    pub fn data(&self) -> &Value {
        &self.body["data"]
    }

    /// `data.id` as a string
    pub fn id(&self) -> String {
        self.data()["id"]
            .as_str()
            .expect("No id in response")
            .to_string()
    }

    /// The machine-readable error code of an error body
    pub fn error_code(&self) -> Option<&str> {
        self.body["error"].as_str()
    }
}
