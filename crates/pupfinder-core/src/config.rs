//! Client configuration.

use serde::{Deserialize, Serialize};

use crate::search::DEFAULT_PAGE_SIZE;
use crate::session::DEFAULT_SESSION_TTL_SECS;

pub const DEFAULT_BASE_URL: &str = "https://frontend-take-home-service.fetch.com";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Settings loaded from `config.toml`. Missing keys take their defaults.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Root URL of the catalog service
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Dogs per search page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Lifetime of the local session record
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: i64,
    /// Per-request timeout
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_session_ttl_secs() -> i64 {
    DEFAULT_SESSION_TTL_SECS
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            page_size: default_page_size(),
            session_ttl_secs: default_session_ttl_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ClientConfig {
    /// Session lifetime as a `chrono` duration.
    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.session_ttl_secs.max(0))
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }
}
