//! Pagination and cache identities for per-task log streams.
//!
//! A log read is keyed by a request identity; on a cache miss the full log is
//! loaded (itself cached under a content identity) and paginated into either
//! a page of records or a raw newline-joined blob.

pub mod errors;
pub mod identity;
pub mod models;
pub mod pagination;
pub mod service;
pub mod storage;
pub mod timestamp;

pub use errors::LogError;
pub use identity::{compute_content_identity, compute_request_identity, CacheIdentity};
pub use models::{
    LogLine, LogRecord, LogStream, LogTimestamp, PageContent, PagerConfig, PaginatedResult,
    PaginationRequest, TaskDescriptor,
};
pub use pagination::paginate;
pub use service::LogService;
pub use storage::{CacheStore, CachedValue, LogSource};
pub use timestamp::to_epoch_millis;
