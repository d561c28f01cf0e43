use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::identity::CacheIdentity;
use crate::models::{LogLine, LogStream, PaginatedResult, TaskDescriptor};

/// Supplies the full, oldest-first log of a task attempt's stream.
#[async_trait]
pub trait LogSource: Send + Sync {
    /// `Ok(None)` when the attempt or stream has no recorded log.
    async fn fetch_log(
        &self,
        task: &TaskDescriptor,
        stream: LogStream,
    ) -> Result<Option<Vec<LogLine>>>;
}

/// Generic key-value cache. Values are opaque bytes.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &CacheIdentity) -> Result<Option<Vec<u8>>>;
    async fn put(&self, key: &CacheIdentity, value: Vec<u8>) -> Result<()>;
}

/// What gets stored under an identity: a full log under its content identity,
/// a computed view under its request identity.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CachedValue {
    Content(Vec<LogLine>),
    Page(PaginatedResult),
}

/// Borrowing twin of `CachedValue`; must stay wire-compatible with it.
#[derive(Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
enum CachedValueRef<'a> {
    Content(&'a [LogLine]),
    Page(&'a PaginatedResult),
}

impl CachedValue {
    pub fn encode_content(lines: &[LogLine]) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(&CachedValueRef::Content(lines))
    }

    pub fn encode_page(result: &PaginatedResult) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(&CachedValueRef::Page(result))
    }

    pub fn from_bytes(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }
}
