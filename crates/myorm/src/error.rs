//! Error types for myorm

use thiserror::Error;

/// Result type alias for myorm operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Error types for database operations
#[derive(Debug, Error)]
pub enum OrmError {
    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error, passed through from the driver unmodified
    #[error("Query error: {0}")]
    Query(#[from] mysql_async::Error),

    /// A single-row lookup matched more than one row
    #[error("Multiple rows found.")]
    MultipleRows,

    /// Statement validation error, raised before any I/O
    #[error("Validation error: {0}")]
    Validation(String),

    /// Pool error
    #[error("Pool error: {0}")]
    Pool(String),
}

impl OrmError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a connection error
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is the multiple-rows consistency error
    pub fn is_multiple_rows(&self) -> bool {
        matches!(self, Self::MultipleRows)
    }
}
