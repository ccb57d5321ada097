use thiserror::Error;

/// Error type that captures common bill-tracking failures.
#[derive(Debug, Error)]
pub enum BillError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid reference: {0}")]
    InvalidRef(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Advisor request failed: {0}")]
    Advisor(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, BillError>;
