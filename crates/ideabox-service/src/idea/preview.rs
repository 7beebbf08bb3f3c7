//! Link previews: fetch Open Graph metadata for link ideas and cache it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use ideabox_cache::{CacheManager, keys};
use ideabox_core::config::PreviewConfig;
use ideabox_core::error::{AppError, ErrorKind};
use ideabox_core::result::AppResult;
use ideabox_database::{EntryStore, Stores};
use ideabox_entity::entry::{EntryKind, EntryPayload};
use ideabox_entity::preview::LinkPreview;

use super::html::extract_preview;

/// Fetches preview metadata for a URL.
#[async_trait]
pub trait PreviewFetcher: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch and extract metadata for `url`.
    async fn fetch(&self, url: &str) -> AppResult<LinkPreview>;
}

/// [`PreviewFetcher`] that downloads the page over HTTP.
#[derive(Debug, Clone)]
pub struct HttpPreviewFetcher {
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl HttpPreviewFetcher {
    /// Build the HTTP client from configuration.
    pub fn new(config: &PreviewConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;
        Ok(Self {
            client,
            max_body_bytes: config.max_body_bytes,
        })
    }
}

#[async_trait]
impl PreviewFetcher for HttpPreviewFetcher {
    async fn fetch(&self, url: &str) -> AppResult<LinkPreview> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|e| AppError::with_source(ErrorKind::Validation, format!("Invalid URL: {url}"), e))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::validation(format!("Unsupported URL scheme: {url}")));
        }

        let mut response = self
            .client
            .get(parsed)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.2",
            )
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, format!("Failed to fetch {url}"), e)
            })?;

        if !response.status().is_success() {
            return Err(AppError::new(
                ErrorKind::ExternalService,
                format!("Fetching {url} returned status {}", response.status()),
            ));
        }

        let mut body = Vec::new();
        while body.len() < self.max_body_bytes {
            let chunk = response.chunk().await.map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, format!("Failed to read {url}"), e)
            })?;
            let Some(chunk) = chunk else {
                break;
            };
            body.extend_from_slice(&chunk);
        }
        body.truncate(self.max_body_bytes);

        Ok(extract_preview(&String::from_utf8_lossy(&body)))
    }
}

/// What the cache stores: the preview plus the URL it was fetched for.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedPreview {
    request_url: String,
    preview: LinkPreview,
}

/// Serves cached link previews for link ideas.
#[derive(Debug, Clone)]
pub struct LinkPreviewService {
    /// Entry store.
    entries: Arc<dyn EntryStore>,
    /// Preview cache.
    cache: CacheManager,
    /// Metadata fetcher.
    fetcher: Arc<dyn PreviewFetcher>,
}

impl LinkPreviewService {
    /// Creates a new link preview service.
    pub fn new(stores: &Stores, cache: CacheManager, fetcher: Arc<dyn PreviewFetcher>) -> Self {
        Self {
            entries: Arc::clone(&stores.entries),
            cache,
            fetcher,
        }
    }

    /// Preview for a link idea.
    ///
    /// A cached preview is reused only while the idea still points at the
    /// URL it was fetched for. Fetch failures yield `None` and are not cached.
    pub async fn get(&self, entry_id: Uuid) -> AppResult<Option<LinkPreview>> {
        let base = self
            .entries
            .find_by_id(entry_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Idea {entry_id} not found")))?;
        if base.kind != EntryKind::Link {
            return Err(AppError::not_found(format!("Idea {entry_id} is not a link")));
        }
        let link = match self.entries.find_child(EntryKind::Link, entry_id).await? {
            Some(child) => match child.payload {
                EntryPayload::Link { link } => link,
                _ => return Err(AppError::integrity(format!("Idea {entry_id} has no link"))),
            },
            None => return Err(AppError::integrity(format!("Idea {entry_id} has no link record"))),
        };

        let key = keys::link_preview(entry_id);
        match self.cache.get_json::<CachedPreview>(&key).await {
            Ok(Some(cached)) if cached.request_url == link => {
                debug!(idea_id = %entry_id, "Link preview cache hit");
                return Ok(Some(cached.preview));
            }
            Ok(_) => {}
            Err(e) => warn!(idea_id = %entry_id, error = %e, "Link preview cache read failed"),
        }

        match self.fetcher.fetch(&link).await {
            Ok(preview) => {
                let cached = CachedPreview {
                    request_url: link,
                    preview,
                };
                if let Err(e) = self.cache.set_json(&key, &cached).await {
                    warn!(idea_id = %entry_id, error = %e, "Link preview cache write failed");
                }
                Ok(Some(cached.preview))
            }
            Err(e) => {
                warn!(idea_id = %entry_id, url = %link, error = %e, "Error fetching Open Graph data");
                Ok(None)
            }
        }
    }
}
