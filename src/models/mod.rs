pub mod config;
pub mod log;
pub mod page;
pub mod task;

pub use config::PagerConfig;
pub use log::{lines_from_text, LogLine, LogTimestamp};
pub use page::{LogRecord, PageContent, PaginatedResult, PaginationRequest};
pub use task::{LogStream, TaskDescriptor};
