use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::LogError;

/// Which of a task attempt's two log channels is being read.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LogStream {
    Stdout,
    Stderr,
}

impl LogStream {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogStream::Stdout => "stdout",
            LogStream::Stderr => "stderr",
        }
    }
}

impl fmt::Display for LogStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogStream {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stdout" => Ok(LogStream::Stdout),
            "stderr" => Ok(LogStream::Stderr),
            other => Err(LogError::Validation(format!(
                "Unknown log stream '{}', expected 'stdout' or 'stderr'",
                other
            ))),
        }
    }
}

/// Identifies one execution attempt of a task.
///
/// Fields are opaque and compared exactly, without case folding or trimming.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TaskDescriptor {
    pub flow_id: String,
    pub run_number: String,
    pub step_name: String,
    pub task_id: String,
    pub attempt_id: String,
}

impl TaskDescriptor {
    pub fn new(
        flow_id: impl Into<String>,
        run_number: impl Into<String>,
        step_name: impl Into<String>,
        task_id: impl Into<String>,
        attempt_id: impl Into<String>,
    ) -> Self {
        Self {
            flow_id: flow_id.into(),
            run_number: run_number.into(),
            step_name: step_name.into(),
            task_id: task_id.into(),
            attempt_id: attempt_id.into(),
        }
    }

    /// Human-readable path used in log and error messages.
    pub fn pathspec(&self) -> String {
        format!(
            "{}/{}/{}/{}/attempt-{}",
            self.flow_id, self.run_number, self.step_name, self.task_id, self.attempt_id
        )
    }
}
