//! Custom error types for Kinsenas
//!
//! Only persistence and lookup problems are errors. Corrupt stored data and
//! non-numeric amounts are handled by falling back to defaults and never reach
//! this type.

use thiserror::Error;

/// The main error type for Kinsenas operations
#[derive(Error, Debug)]
pub enum KinsenasError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Rejected edits
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl KinsenasError {
    /// Create a "not found" error for budget rows
    pub fn budget_row_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget row",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expense rows
    pub fn expense_row_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense row",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for KinsenasError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for KinsenasError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Kinsenas operations
pub type KinsenasResult<T> = Result<T, KinsenasError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KinsenasError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = KinsenasError::budget_row_not_found("row-1234abcd");
        assert_eq!(err.to_string(), "Budget row not found: row-1234abcd");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: KinsenasError = io_err.into();
        assert!(matches!(err, KinsenasError::Io(_)));
    }
}
