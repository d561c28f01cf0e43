use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for LogError {
    fn from(err: anyhow::Error) -> Self {
        LogError::Storage(format!("{:#}", err))
    }
}

impl From<serde_json::Error> for LogError {
    fn from(err: serde_json::Error) -> Self {
        LogError::Internal(err.to_string())
    }
}
