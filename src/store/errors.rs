//! # Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Failures reported by the relational store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A unique or primary-key constraint rejected the statement
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A foreign-key constraint rejected the statement
    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    /// A row could not be mapped into the expected shape
    #[error("row decode failed: {0}")]
    Decode(String),

    /// Any other database failure
    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        match &err {
            sqlx::Error::Database(db) => {
                let constraint = db.constraint().unwrap_or_default().to_string();
                match db.kind() {
                    ErrorKind::UniqueViolation => StoreError::UniqueViolation(constraint),
                    ErrorKind::ForeignKeyViolation => StoreError::ForeignKeyViolation(constraint),
                    _ => StoreError::Database(db.message().to_string()),
                }
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                StoreError::Decode(err.to_string())
            }
            _ => StoreError::Database(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Decode(err.to_string())
    }
}
