//! Link preview fetcher configuration.

use serde::{Deserialize, Serialize};

/// Settings for fetching Open Graph metadata of link ideas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// User-Agent sent with preview requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Upper bound on the HTML body inspected for metadata.
    #[serde(default = "default_max_body")]
    pub max_body_bytes: usize,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
            max_body_bytes: default_max_body(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

// Many sites only serve Open Graph tags to crawlers they recognise.
fn default_user_agent() -> String {
    "facebookexternalhit/1.1 (+http://www.facebook.com/externalhit_uatext.php)".to_string()
}

fn default_max_body() -> usize {
    512 * 1024
}
