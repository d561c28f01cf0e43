use serde::{Deserialize, Serialize};

use crate::models::{LogStream, PaginationRequest};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagerConfig {
    #[serde(default = "default_page")]
    pub default_page: u32,
    #[serde(default = "default_limit")]
    pub default_limit: u32,
    /// Store the full unpaginated log under its content identity after a fetch.
    #[serde(default = "default_cache_content")]
    pub cache_content: bool,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    0 // no limit
}

fn default_cache_content() -> bool {
    true
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            default_page: default_page(),
            default_limit: default_limit(),
            cache_content: default_cache_content(),
        }
    }
}

impl PagerConfig {
    /// A request for `stream` pre-filled with the configured page and limit.
    pub fn request(&self, stream: LogStream) -> PaginationRequest {
        PaginationRequest {
            page: self.default_page,
            limit: self.default_limit,
            stream,
            ..PaginationRequest::default()
        }
    }
}
