//! Error types for record and settings storage.

use thiserror::Error;

/// Failure reading or writing persisted data
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// File system errors
    #[error("File system error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Backend refused the operation
    #[error("Storage error: {0}")]
    Storage(String),
}

/// Result type alias for persistence operations.
pub type Result<T> = std::result::Result<T, PersistenceError>;

impl PersistenceError {
    /// Creates a new storage backend error.
    #[must_use]
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Self::Storage(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PersistenceError::storage("read only");
        assert_eq!(err.to_string(), "Storage error: read only");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u64>("nope").unwrap_err();
        let err: PersistenceError = json_err.into();
        assert!(matches!(err, PersistenceError::Json(_)));
    }
}
