use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("JSON error: {source}")]
    JsonError {
        #[from]
        source: serde_json::Error,
    },

    #[error("CSV data format error: {0}")]
    CsvDataFormatError(String),

    #[error("Market data error: {0}")]
    MarketDataError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Safety check error: {0}")]
    SafetyCheckError(String),

    #[error("Timed out after {millis} ms: {operation}")]
    Timeout { operation: String, millis: u64 },

    // Catch-all for anyhow errors raised by file loaders and collaborators.
    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

impl EngineError {
    pub fn timeout(operation: impl Into<String>, duration: std::time::Duration) -> Self {
        EngineError::Timeout {
            operation: operation.into(),
            millis: duration.as_millis() as u64,
        }
    }
}
