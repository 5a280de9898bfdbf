use thiserror::Error;

/// Error type that captures common storage and configuration failures.
///
/// The aggregation engine itself never returns an error: malformed input
/// degrades to zero values or fallback labels instead.
#[derive(Debug, Error)]
pub enum StudioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error("Invalid date range: {0}")]
    InvalidDateRange(String),
}
