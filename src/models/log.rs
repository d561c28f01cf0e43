use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A per-line timestamp as delivered by a log source.
///
/// Sources disagree on representation: some attach real instants, some have
/// already converted to epoch milliseconds, and some hand over whatever text
/// they found in the line prefix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum LogTimestamp {
    EpochMillis(i64),
    Instant(DateTime<FixedOffset>),
    Text(String),
}

impl From<DateTime<FixedOffset>> for LogTimestamp {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        LogTimestamp::Instant(dt)
    }
}

impl From<DateTime<chrono::Utc>> for LogTimestamp {
    fn from(dt: DateTime<chrono::Utc>) -> Self {
        LogTimestamp::Instant(dt.fixed_offset())
    }
}

/// One line of log content, oldest-first order preserved by the source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogLine {
    pub timestamp: Option<LogTimestamp>,
    pub text: String,
}

impl LogLine {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            timestamp: None,
            text: text.into(),
        }
    }

    pub fn with_timestamp(timestamp: impl Into<LogTimestamp>, text: impl Into<String>) -> Self {
        Self {
            timestamp: Some(timestamp.into()),
            text: text.into(),
        }
    }
}

/// Split a plain text log into untimestamped lines.
///
/// Accepts `\n` and `\r\n` terminators. A trailing terminator does not yield
/// an empty final line.
pub fn lines_from_text(content: &str) -> Vec<LogLine> {
    content.lines().map(LogLine::new).collect()
}
