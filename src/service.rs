use std::sync::Arc;

use crate::errors::LogError;
use crate::identity::CacheIdentity;
use crate::models::{LogLine, PagerConfig, PaginatedResult, PaginationRequest, TaskDescriptor};
use crate::storage::{CacheStore, CachedValue, LogSource};

/// Serves log reads through the cache: request identity first, then the
/// cached full log under the content identity, then the log source.
///
/// Cache failures are logged and treated as misses.
pub struct LogService {
    source: Arc<dyn LogSource>,
    cache: Arc<dyn CacheStore>,
    config: Arc<PagerConfig>,
}

impl LogService {
    pub fn new(
        source: Arc<dyn LogSource>,
        cache: Arc<dyn CacheStore>,
        config: Arc<PagerConfig>,
    ) -> Self {
        Self {
            source,
            cache,
            config,
        }
    }

    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    pub async fn read(
        &self,
        task: &TaskDescriptor,
        request: &PaginationRequest,
    ) -> Result<PaginatedResult, LogError> {
        request.validate()?;

        let request_id = request.request_identity(task);
        if let Some(CachedValue::Page(result)) = self.cache_get(&request_id).await {
            tracing::debug!("Cache hit for {} ({})", task.pathspec(), request_id);
            return Ok(result);
        }

        let content = self.load_content(task, request).await?;
        let result = request.apply(&content)?;

        self.cache_put(&request_id, CachedValue::encode_page(&result)).await;
        Ok(result)
    }

    async fn load_content(
        &self,
        task: &TaskDescriptor,
        request: &PaginationRequest,
    ) -> Result<Vec<LogLine>, LogError> {
        let content_id = request.content_identity(task);
        if let Some(CachedValue::Content(lines)) = self.cache_get(&content_id).await {
            tracing::debug!("Using cached {} log of {}", request.stream, task.pathspec());
            return Ok(lines);
        }

        tracing::debug!("Fetching {} log of {}", request.stream, task.pathspec());
        let lines = self
            .source
            .fetch_log(task, request.stream)
            .await?
            .ok_or_else(|| {
                LogError::NotFound(format!(
                    "No {} log recorded for {}",
                    request.stream,
                    task.pathspec()
                ))
            })?;

        if self.config.cache_content {
            self.cache_put(&content_id, CachedValue::encode_content(&lines)).await;
        }
        Ok(lines)
    }

    async fn cache_get(&self, key: &CacheIdentity) -> Option<CachedValue> {
        match self.cache.get(key).await {
            Ok(Some(bytes)) => match CachedValue::from_bytes(&bytes) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!("Discarding undecodable cache entry {}: {}", key, e);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Cache lookup for {} failed: {:#}", key, e);
                None
            }
        }
    }

    async fn cache_put(&self, key: &CacheIdentity, encoded: serde_json::Result<Vec<u8>>) {
        let bytes = match encoded {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!("Skipping cache store for {}: encoding failed: {}", key, e);
                return;
            }
        };
        if let Err(e) = self.cache.put(key, bytes).await {
            tracing::warn!("Cache store for {} failed: {:#}", key, e);
        }
    }
}
