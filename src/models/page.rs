use serde::{Deserialize, Serialize};

use crate::errors::LogError;
use crate::identity::{compute_content_identity, compute_request_identity, CacheIdentity};
use crate::models::{LogLine, LogStream, TaskDescriptor};
use crate::pagination::paginate;

/// Parameters of a single log read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationRequest {
    /// 1-indexed page number.
    pub page: u32,
    /// Lines per page; 0 returns everything as a single page.
    pub limit: u32,
    pub reverse_order: bool,
    /// Return the whole log as one newline-joined string, bypassing slicing.
    pub output_raw: bool,
    pub stream: LogStream,
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 0,
            reverse_order: false,
            output_raw: false,
            stream: LogStream::Stdout,
        }
    }
}

impl PaginationRequest {
    pub fn validate(&self) -> Result<(), LogError> {
        validate_page(self.page)
    }

    pub fn content_identity(&self, task: &TaskDescriptor) -> CacheIdentity {
        compute_content_identity(task, self.stream)
    }

    pub fn request_identity(&self, task: &TaskDescriptor) -> CacheIdentity {
        compute_request_identity(
            task,
            self.stream,
            self.page,
            self.limit,
            self.reverse_order,
            self.output_raw,
        )
    }

    pub fn apply(&self, content: &[LogLine]) -> Result<PaginatedResult, LogError> {
        paginate(
            content,
            self.page,
            self.limit,
            self.reverse_order,
            self.output_raw,
        )
    }
}

pub(crate) fn validate_page(page: u32) -> Result<(), LogError> {
    if page == 0 {
        return Err(LogError::Validation(
            "page is 1-indexed and must be >= 1".to_string(),
        ));
    }
    Ok(())
}

/// A line as returned to clients. `row` is relative to the returned page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LogRecord {
    pub row: usize,
    pub line: String,
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum PageContent {
    Lines(Vec<LogRecord>),
    Raw(String),
}

impl PageContent {
    /// Structured records, or `None` for a raw payload.
    pub fn records(&self) -> Option<&[LogRecord]> {
        match self {
            PageContent::Lines(records) => Some(records.as_slice()),
            PageContent::Raw(_) => None,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        match self {
            PageContent::Lines(_) => None,
            PageContent::Raw(text) => Some(text.as_str()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginatedResult {
    pub content: PageContent,
    pub pages: u32,
}
